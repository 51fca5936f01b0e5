//! Incremental Merkle Tree for transfer commitments
//!
//! Implements an append-only Merkle tree optimized for on-chain storage.
//! Uses the filled_subtrees pattern for O(depth) insertions: the root is
//! never recomputed from scratch, only updated along the new leaf's path.
//!
//! # Hash Function
//! Poseidon (BN254, circom parameters) for every node, see
//! `crypto/poseidon.rs`. Empty positions hash as the per-level zero value.

use anchor_lang::prelude::*;

use crate::crypto::poseidon;
use crate::error::AccumulatorError;

/// Maximum supported tree depth (2^32 leaves)
pub const MAX_TREE_DEPTH: u8 = 32;

/// Minimum supported tree depth
pub const MIN_TREE_DEPTH: u8 = 4;

/// Depth the condense circuit is compiled for
pub const DEFAULT_TREE_DEPTH: u8 = 26;

/// Incremental Merkle tree state account, one per mint.
///
/// PDA Seeds: `[b"merkle_tree", mint.key().as_ref()]`
#[account]
#[derive(Default)]
pub struct MerkleTree {
    /// Mint whose transfers this tree records
    pub mint: Pubkey,

    /// Authority that created the tree
    pub authority: Pubkey,

    /// Tree depth (immutable after init)
    pub depth: u8,

    /// Next leaf index to be filled (also = total leaves appended)
    pub next_index: u64,

    /// Current root hash
    pub current_root: [u8; 32],

    /// Filled subtrees for incremental updates
    /// Contains the rightmost left-child hash at each level
    /// Length = depth
    pub filled_subtrees: Vec<[u8; 32]>,

    /// Precomputed zero values for each level
    /// zeros[0] = empty leaf
    /// zeros[i] = hash(zeros[i-1], zeros[i-1])
    /// Length = depth + 1
    pub zeros: Vec<[u8; 32]>,

    /// PDA bump seed
    pub bump: u8,
}

/// Result of a successful append.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppendedLeaf {
    /// Position the leaf was written to
    pub leaf_index: u64,
    /// Root after the append
    pub root: [u8; 32],
    /// Sibling hashes from the leaf up to (excluding) the root
    pub path: Vec<[u8; 32]>,
}

impl MerkleTree {
    /// Seed prefix for PDA derivation
    pub const SEED_PREFIX: &'static [u8] = b"merkle_tree";

    /// Calculate space needed for a merkle tree account of `depth`.
    pub fn space(depth: u8) -> usize {
        let depth_usize = depth as usize;

        8                                       // discriminator
            + 32                                // mint
            + 32                                // authority
            + 1                                 // depth
            + 8                                 // next_index
            + 32                                // current_root
            + 4 + (32 * depth_usize)            // filled_subtrees (vec)
            + 4 + (32 * (depth_usize + 1))      // zeros (vec)
            + 1                                 // bump
    }

    /// Derive the PDA address for a mint's tree
    pub fn find_pda(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED_PREFIX, mint.as_ref()], program_id)
    }

    /// Initialize the Merkle tree with empty state.
    pub fn initialize(
        &mut self,
        mint: Pubkey,
        authority: Pubkey,
        depth: u8,
        bump: u8,
    ) -> Result<()> {
        require!(
            (MIN_TREE_DEPTH..=MAX_TREE_DEPTH).contains(&depth),
            AccumulatorError::InvalidTreeDepth
        );

        self.mint = mint;
        self.authority = authority;
        self.depth = depth;
        self.next_index = 0;
        self.bump = bump;

        self.zeros = poseidon::zero_values(depth)?;

        // Overwritten level by level as left children arrive
        self.filled_subtrees = self.zeros[..depth as usize].to_vec();

        self.current_root = self.zeros[depth as usize];

        Ok(())
    }

    /// Append a leaf at `next_index` and return the new root and its path.
    ///
    /// # Errors
    /// * `MerkleTreeFull` if tree has reached capacity. State is untouched.
    pub fn append(&mut self, leaf: [u8; 32]) -> Result<AppendedLeaf> {
        require!(!self.is_full(), AccumulatorError::MerkleTreeFull);

        let leaf_index = self.next_index;
        let mut current_hash = leaf;
        let mut current_index = leaf_index;
        let mut path = Vec::with_capacity(self.depth as usize);

        for level in 0..self.depth as usize {
            let is_right_child = (current_index & 1) == 1;
            current_index >>= 1;

            if is_right_child {
                let left_sibling = self.filled_subtrees[level];
                path.push(left_sibling);
                current_hash = poseidon::hash_two_to_one(&left_sibling, &current_hash)?;
            } else {
                self.filled_subtrees[level] = current_hash;
                path.push(self.zeros[level]);
                current_hash = poseidon::hash_two_to_one(&current_hash, &self.zeros[level])?;
            }
        }

        self.current_root = current_hash;
        self.next_index = self
            .next_index
            .checked_add(1)
            .ok_or(error!(AccumulatorError::ArithmeticOverflow))?;

        Ok(AppendedLeaf {
            leaf_index,
            root: current_hash,
            path,
        })
    }

    /// Get the current Merkle root.
    pub fn current_root(&self) -> [u8; 32] {
        self.current_root
    }

    /// Number of leaves appended so far.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Get tree capacity (2^depth).
    pub fn capacity(&self) -> u64 {
        1u64.checked_shl(self.depth as u32).unwrap_or(u64::MAX)
    }

    /// Check if tree is full.
    pub fn is_full(&self) -> bool {
        self.next_index >= self.capacity()
    }

    /// Root of an empty tree of this depth.
    pub fn empty_root(&self) -> [u8; 32] {
        self.zeros[self.depth as usize]
    }
}

/// Recompute a root from a leaf, its index and its sibling path.
pub fn compute_root_from_path(
    leaf: &[u8; 32],
    leaf_index: u64,
    path: &[[u8; 32]],
) -> Result<[u8; 32]> {
    let mut current_hash = *leaf;
    let mut current_index = leaf_index;

    for sibling in path {
        current_hash = if current_index & 1 == 1 {
            poseidon::hash_two_to_one(sibling, &current_hash)?
        } else {
            poseidon::hash_two_to_one(&current_hash, sibling)?
        };
        current_index >>= 1;
    }

    Ok(current_hash)
}

/// Check a Merkle path against an expected root.
pub fn verify_path(
    leaf: &[u8; 32],
    leaf_index: u64,
    path: &[[u8; 32]],
    root: &[u8; 32],
) -> Result<bool> {
    Ok(compute_root_from_path(leaf, leaf_index, path)? == *root)
}
