//! Event definitions for the Vapor Tokens accumulator
//!
//! Wallets MUST index `TransferRecorded` to rebuild the tree and compute
//! the Merkle paths their condense proofs are built from.

use anchor_lang::prelude::*;

/// Emitted when a mint's accumulator is created.
#[event]
pub struct AccumulatorInitialized {
    /// Mint this accumulator records transfers for
    pub mint: Pubkey,
    /// Authority that created the tree (also governs the condenser VK)
    pub authority: Pubkey,
    /// Fixed tree depth
    pub tree_depth: u8,
    /// Empty-tree root
    pub root: [u8; 32],
    /// Unix timestamp
    pub timestamp: i64,
}

/// Emitted when the transfer hook's extra account metas are provisioned.
#[event]
pub struct ReleaseHooksInitialized {
    pub mint: Pubkey,
    pub extra_account_meta_list: Pubkey,
    pub timestamp: i64,
}

/// Emitted for every intercepted transfer.
#[event]
pub struct TransferRecorded {
    /// Mint being transferred
    pub mint: Pubkey,
    /// Owner of the destination token account
    pub to: Pubkey,
    /// Amount transferred
    pub amount: u64,
    /// Leaf commitment appended to the tree
    pub leaf: [u8; 32],
    /// Index of this leaf in the tree (0-indexed)
    pub leaf_index: u64,
    /// New Merkle root after insertion
    pub root: [u8; 32],
    /// Unix timestamp
    pub timestamp: i64,
}
