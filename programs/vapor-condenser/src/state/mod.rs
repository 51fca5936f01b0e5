//! State accounts for the Vapor Tokens condenser

pub mod verification_key;
pub mod withdrawn_tracker;

pub use verification_key::*;
pub use withdrawn_tracker::*;

/// Seed for the PDA that holds the mint authority
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint_authority";
