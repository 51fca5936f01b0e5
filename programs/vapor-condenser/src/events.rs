//! Event definitions for the Vapor Tokens condenser

use anchor_lang::prelude::*;

/// Emitted when a verification key is set or replaced.
#[event]
pub struct VerificationKeySet {
    /// Mint this VK gates
    pub mint: Pubkey,
    /// Authority who set the VK
    pub authority: Pubkey,
    /// Number of IC points in VK
    pub ic_length: u8,
    /// Unix timestamp
    pub timestamp: i64,
}

/// Emitted when a verification key is frozen.
#[event]
pub struct VerificationKeyLocked {
    pub mint: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

/// Emitted on every successful condense.
#[event]
pub struct Condensed {
    /// Mint released
    pub mint: Pubkey,
    /// Recipient whose entitlement was proven
    pub recipient: Pubkey,
    /// Amount minted by this call
    pub amount: u64,
    /// Recipient's released total after this call
    pub total_withdrawn: u64,
    /// Accumulator root the proof was checked against
    pub root: [u8; 32],
    /// Unix timestamp
    pub timestamp: i64,
}
