//! Vapor Tokens - Transfer Accumulator
//!
//! Token-2022 transfer hook that appends a Poseidon commitment of every
//! `(destination owner, amount)` pair to a per-mint incremental Merkle tree.
//! The condenser program later releases value against proofs of inclusion
//! in this tree.

use anchor_lang::prelude::*;

pub mod crypto;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;


use instructions::*;

declare_id!("4pY5QvuVwh2Ktd6LAiAGhuhFvVFqx6GCioh6iThmLT8y");

#[program]
pub mod vapor_accumulator {
    use super::*;

    pub fn initialize_accumulator(
        ctx: Context<InitializeAccumulator>,
        tree_depth: u8,
    ) -> Result<()> {
        instructions::initialize_accumulator::handler(ctx, tree_depth)
    }

    pub fn initialize_release_hooks(ctx: Context<InitializeReleaseHooks>) -> Result<()> {
        instructions::initialize_release_hooks::handler(ctx)
    }

    #[interface(spl_transfer_hook_interface::execute)]
    pub fn transfer_hook(ctx: Context<TransferHook>, amount: u64) -> Result<()> {
        instructions::transfer_hook::handler(ctx, amount)
    }
}
