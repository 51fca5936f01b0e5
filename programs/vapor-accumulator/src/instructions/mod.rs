//! Instruction handlers for the Vapor Tokens accumulator

pub mod initialize_accumulator;
pub mod initialize_release_hooks;
pub mod transfer_hook;

pub use initialize_accumulator::*;
pub use initialize_release_hooks::*;
pub use transfer_hook::*;
