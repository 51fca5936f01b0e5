//! Instruction handlers for the Vapor Tokens condenser

pub mod condense;
pub mod lock_verification_key;
pub mod set_verification_key;

pub use condense::*;
pub use lock_verification_key::*;
pub use set_verification_key::*;
