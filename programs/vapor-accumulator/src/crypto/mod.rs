//! Hashing primitives for the transfer accumulator
//!
//! Everything here must stay bit-for-bit compatible with the condense
//! circuit: the leaf formula, the key packing and the amount encoding.

pub mod poseidon;

pub use poseidon::{
    empty_leaf_hash, hash_transfer_leaf, hash_two_to_one, pack_pubkey,
    u64_to_bytes32_be, unpack_pubkey, zero_values,
};
