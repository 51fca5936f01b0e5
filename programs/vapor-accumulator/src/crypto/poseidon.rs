//! Poseidon hashing for the transfer accumulator
//!
//! # Hash Function Architecture
//!
//! Leaves and internal nodes both use circom-compatible Poseidon over the
//! BN254 scalar field (x^5 S-box, big-endian in and out). On-chain this is
//! the `sol_poseidon` syscall; off-chain `solana_program::poseidon` falls
//! back to `light-poseidon` with identical parameters, so wallets and tests
//! reproduce the exact on-chain roots.
//!
//! ## Leaf Commitment
//! ```text
//! leaf = Poseidon(owner_lo, owner_hi, amount_be32)
//! ```
//! `owner_lo`/`owner_hi` are the destination owner packed into two field
//! elements (see [`pack_pubkey`]). The condense circuit recomputes this
//! exact leaf, so the packing and amount encoding are consensus-critical.
//!
//! ## Merkle Nodes
//! ```text
//! node = Poseidon(left, right)
//! ```

use anchor_lang::prelude::*;
use solana_program::poseidon::{hashv, Endianness, Parameters};

use crate::error::AccumulatorError;

/// Bytes per packed chunk. 31 bytes always fit below the BN254 scalar modulus.
const CHUNK_LEN: usize = 31;

// ============================================================================
// MERKLE TREE HASH
// ============================================================================

/// Hash two 32-byte children into their parent node.
pub fn hash_two_to_one(left: &[u8; 32], right: &[u8; 32]) -> Result<[u8; 32]> {
    poseidon(&[left.as_slice(), right.as_slice()])
}

/// Compute zero hash values for each tree level.
///
/// `zeros[0]` is the empty leaf, `zeros[i] = hash(zeros[i-1], zeros[i-1])`,
/// and `zeros[depth]` is the root of an empty tree.
pub fn zero_values(depth: u8) -> Result<Vec<[u8; 32]>> {
    let mut zeros = Vec::with_capacity(depth as usize + 1);
    zeros.push(empty_leaf_hash());

    for level in 1..=depth as usize {
        let prev = zeros[level - 1];
        zeros.push(hash_two_to_one(&prev, &prev)?);
    }

    Ok(zeros)
}

// ============================================================================
// LEAF COMMITMENT
// ============================================================================

/// Leaf commitment for a transfer of `amount` tokens to `owner`.
pub fn hash_transfer_leaf(owner: &Pubkey, amount: u64) -> Result<[u8; 32]> {
    let [lo, hi] = pack_pubkey(owner);
    let amount = u64_to_bytes32_be(amount);
    poseidon(&[lo.as_slice(), hi.as_slice(), amount.as_slice()])
}

fn poseidon(inputs: &[&[u8]]) -> Result<[u8; 32]> {
    hashv(Parameters::Bn254X5, Endianness::BigEndian, inputs)
        .map(|hash| hash.to_bytes())
        .map_err(|e| {
            msg!("Poseidon hash failed: {:?}", e);
            error!(AccumulatorError::HashFailure)
        })
}

// ============================================================================
// FIELD ENCODING
// ============================================================================

/// Pack a 32-byte key into two big-endian field elements.
///
/// The key is split into 31-byte chunks, each read as a little-endian
/// integer (zero padded), then written out big-endian:
/// ```text
/// lo = 0x00 || reverse(key[0..31])
/// hi = 0x00 * 31 || key[31]
/// ```
pub fn pack_pubkey(key: &Pubkey) -> [[u8; 32]; 2] {
    let bytes = key.to_bytes();

    let mut lo = [0u8; 32];
    for (i, b) in bytes[..CHUNK_LEN].iter().enumerate() {
        lo[31 - i] = *b;
    }

    let mut hi = [0u8; 32];
    hi[31] = bytes[CHUNK_LEN];

    [lo, hi]
}

/// Inverse of [`pack_pubkey`].
///
/// Returns `None` for any non-canonical encoding, so a single key has
/// exactly one valid pair of field elements.
pub fn unpack_pubkey(lo: &[u8; 32], hi: &[u8; 32]) -> Option<Pubkey> {
    if lo[0] != 0 || hi[..31].iter().any(|&b| b != 0) {
        return None;
    }

    let mut bytes = [0u8; 32];
    for (i, b) in bytes[..CHUNK_LEN].iter_mut().enumerate() {
        *b = lo[31 - i];
    }
    bytes[CHUNK_LEN] = hi[31];

    Some(Pubkey::new_from_array(bytes))
}

/// Convert u64 to 32-byte big-endian representation.
///
/// Places the 8-byte big-endian value in the last 8 bytes.
#[inline]
pub fn u64_to_bytes32_be(value: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    bytes[24..32].copy_from_slice(&value.to_be_bytes());
    bytes
}

/// Empty leaf hash (all zeros).
#[inline]
pub fn empty_leaf_hash() -> [u8; 32] {
    [0u8; 32]
}

/// Check if a 32-byte value is all zeros.
#[cfg(test)]
pub fn is_zero_hash(hash: &[u8; 32]) -> bool {
    hash.iter().all(|&b| b == 0)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use light_poseidon::{Poseidon, PoseidonBytesHasher};

    #[test]
    fn test_hash_two_to_one_deterministic() {
        let left = [1u8; 32];
        let right = [2u8; 32];
        let h1 = hash_two_to_one(&left, &right).unwrap();
        let h2 = hash_two_to_one(&left, &right).unwrap();
        assert_eq!(h1, h2, "Hash should be deterministic");
    }

    #[test]
    fn test_hash_two_to_one_non_commutative() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        let h1 = hash_two_to_one(&a, &b).unwrap();
        let h2 = hash_two_to_one(&b, &a).unwrap();
        assert_ne!(h1, h2, "Hash should not be commutative");
    }

    #[test]
    fn test_matches_light_poseidon() {
        let left = [0x11u8; 32];
        let right = [0x22u8; 32];

        let mut reference = Poseidon::<Fr>::new_circom(2).unwrap();
        let expected = reference.hash_bytes_be(&[&left, &right]).unwrap();

        assert_eq!(hash_two_to_one(&left, &right).unwrap(), expected);
    }

    #[test]
    fn test_leaf_matches_light_poseidon() {
        let owner = Pubkey::new_unique();
        let [lo, hi] = pack_pubkey(&owner);
        let amount = u64_to_bytes32_be(1000);

        let mut reference = Poseidon::<Fr>::new_circom(3).unwrap();
        let expected = reference.hash_bytes_be(&[&lo, &hi, &amount]).unwrap();

        assert_eq!(hash_transfer_leaf(&owner, 1000).unwrap(), expected);
    }

    #[test]
    fn test_first_zero_value_known_answer() {
        // Poseidon(0, 0), the level-1 zero of every circom Poseidon tree
        let expected: [u8; 32] = [
            0x20, 0x98, 0xf5, 0xfb, 0x9e, 0x23, 0x9e, 0xab,
            0x3c, 0xea, 0xc3, 0xf2, 0x7b, 0x81, 0xe4, 0x81,
            0xdc, 0x31, 0x24, 0xd5, 0x5f, 0xfe, 0xd5, 0x23,
            0xa8, 0x39, 0xee, 0x84, 0x46, 0xb6, 0x48, 0x64,
        ];
        let zeros = zero_values(1).unwrap();
        assert_eq!(zeros[0], [0u8; 32]);
        assert_eq!(zeros[1], expected);
    }

    #[test]
    fn test_leaf_binds_amount_and_owner() {
        let owner = Pubkey::new_unique();
        let other = Pubkey::new_unique();

        let base = hash_transfer_leaf(&owner, 1000).unwrap();
        assert_ne!(base, hash_transfer_leaf(&owner, 1001).unwrap());
        assert_ne!(base, hash_transfer_leaf(&other, 1000).unwrap());
    }

    #[test]
    fn test_pack_layout() {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8 + 1;
        }
        let [lo, hi] = pack_pubkey(&Pubkey::new_from_array(bytes));

        assert_eq!(lo[0], 0);
        assert_eq!(lo[31], 1); // least significant byte = key[0]
        assert_eq!(lo[1], 31); // most significant byte = key[30]
        assert!(hi[..31].iter().all(|&b| b == 0));
        assert_eq!(hi[31], 32);
    }

    #[test]
    fn test_unpack_inverts_pack() {
        let key = Pubkey::new_unique();
        let [lo, hi] = pack_pubkey(&key);
        assert_eq!(unpack_pubkey(&lo, &hi), Some(key));
    }

    #[test]
    fn test_unpack_rejects_non_canonical() {
        let [mut lo, mut hi] = pack_pubkey(&Pubkey::new_unique());

        let mut bad_lo = lo;
        bad_lo[0] = 1;
        assert_eq!(unpack_pubkey(&bad_lo, &hi), None);

        hi[30] = 1;
        assert_eq!(unpack_pubkey(&lo, &hi), None);

        hi[30] = 0;
        lo[0] = 0;
        assert!(unpack_pubkey(&lo, &hi).is_some());
    }

    #[test]
    fn test_u64_to_bytes32_be() {
        let value = 0x0102030405060708u64;
        let bytes = u64_to_bytes32_be(value);

        assert!(bytes[..24].iter().all(|&b| b == 0));
        assert_eq!(bytes[24], 0x01);
        assert_eq!(bytes[31], 0x08);
    }

    #[test]
    fn test_empty_leaf_hash() {
        assert!(is_zero_hash(&empty_leaf_hash()));
        let mut partial = [0u8; 32];
        partial[31] = 1;
        assert!(!is_zero_hash(&partial));
    }
}
