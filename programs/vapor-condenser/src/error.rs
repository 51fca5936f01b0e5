//! Error types for the Vapor Tokens condenser
//!
//! Error codes are stable across versions for client compatibility.

use anchor_lang::prelude::*;

#[error_code]
pub enum CondenserError {
    // ========== Proof Errors ==========

    /// Groth16 verification failed or proof was malformed
    #[msg("Invalid proof: verification failed")]
    InvalidProof, // 6000

    /// Public witness has the wrong shape or a non-canonical input
    #[msg("Invalid witness: expected 4 canonical public inputs")]
    InvalidWitness, // 6001

    /// Witness was built against a root that is no longer current
    #[msg("Witness root does not match the current accumulator root")]
    StaleRoot, // 6002

    // ========== Entitlement Errors ==========

    /// Proven cumulative amount equals what was already released
    #[msg("Nothing to withdraw: proven amount already released")]
    NothingToWithdraw, // 6003

    /// Proven cumulative amount is below what was already released
    #[msg("Proven amount is below the recipient's released total")]
    InsufficientAccumulatedBalance, // 6004

    /// Witness recipient differs from the recipient argument
    #[msg("Witness recipient does not match the condense recipient")]
    RecipientMismatch, // 6005

    // ========== Verification Key Errors ==========

    /// VK has not been configured for this mint
    #[msg("Verification key not configured for this mint")]
    VerificationKeyNotSet, // 6006

    /// VK was locked and can no longer change
    #[msg("Verification key is locked")]
    VerificationKeyLocked, // 6007

    /// VK points are malformed or not on the curve
    #[msg("Invalid verification key")]
    InvalidVerificationKey, // 6008

    // ========== Authorization Errors ==========

    /// Signer is not the accumulator authority
    #[msg("Unauthorized: caller is not the accumulator authority")]
    Unauthorized, // 6009

    /// Tracker account is bound to a different (mint, recipient)
    #[msg("Withdrawn tracker does not belong to this mint and recipient")]
    TrackerMismatch, // 6010

    // ========== Overflow / Computation Errors ==========

    /// Arithmetic overflow occurred
    #[msg("Arithmetic overflow/underflow occurred")]
    ArithmeticOverflow, // 6011
}
