//! Error types for the Vapor Tokens accumulator
//!
//! Error codes are stable across versions for client compatibility.

use anchor_lang::prelude::*;

#[error_code]
pub enum AccumulatorError {
    // ========== Merkle Tree Errors ==========

    /// Merkle tree has reached maximum capacity
    #[msg("Merkle tree is full: cannot add more leaves")]
    MerkleTreeFull, // 6000

    /// Invalid tree depth parameter
    #[msg("Tree depth must be between 4 and 32")]
    InvalidTreeDepth, // 6001

    /// Poseidon syscall rejected its input
    #[msg("Poseidon hash computation failed")]
    HashFailure, // 6002

    // ========== Transfer Hook Errors ==========

    /// Hook invoked outside of a Token-2022 transfer
    #[msg("The token is not currently transferring")]
    IsNotCurrentlyTransferring, // 6003

    /// Tree account does not belong to the mint being transferred
    #[msg("Merkle tree does not belong to this mint")]
    MintMismatch, // 6004

    // ========== Overflow / Computation Errors ==========

    /// Arithmetic overflow occurred
    #[msg("Arithmetic overflow/underflow occurred")]
    ArithmeticOverflow, // 6005

    // ========== Authorization Errors ==========

    /// Mint carries no Token-2022 transfer hook extension
    #[msg("Mint has no transfer hook extension")]
    MissingTransferHook, // 6006

    /// Mint's transfer hook points at a different program
    #[msg("Mint's transfer hook program is not this accumulator")]
    HookProgramMismatch, // 6007

    /// Signer is not the mint's transfer hook authority
    #[msg("Unauthorized: signer is not the mint's transfer hook authority")]
    Unauthorized, // 6008
}
