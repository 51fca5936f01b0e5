//! State accounts for the Vapor Tokens accumulator

pub mod merkle_tree;

pub use merkle_tree::*;

/// Seed for the Token-2022 extra account metas PDA
pub const EXTRA_ACCOUNT_METAS_SEED: &[u8] = b"extra-account-metas";
