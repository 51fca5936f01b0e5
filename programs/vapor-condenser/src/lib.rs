//! Vapor Tokens - Condenser
//!
//! Mints previously accumulated value to a recipient who proves, with a
//! Groth16 proof over the accumulator's live root, how much the transfer
//! accumulator has recorded for them in total. A per-recipient tracker
//! makes every unit releasable once.

use anchor_lang::prelude::*;

pub mod crypto;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

#[cfg(test)]
mod test_fixtures;

use instructions::*;

declare_id!("Bs5oDuMEnM4VzseKjNndM4wgzZUhrWNJ2DRpiMp9xVFv");

#[program]
pub mod vapor_condenser {
    use super::*;

    pub fn set_verification_key(
        ctx: Context<SetVerificationKey>,
        vk_alpha_g1: [u8; 64],
        vk_beta_g2: [u8; 128],
        vk_gamma_g2: [u8; 128],
        vk_delta_g2: [u8; 128],
        vk_ic: Vec<[u8; 64]>,
    ) -> Result<()> {
        instructions::set_verification_key::handler(
            ctx,
            vk_alpha_g1,
            vk_beta_g2,
            vk_gamma_g2,
            vk_delta_g2,
            vk_ic,
        )
    }

    pub fn lock_verification_key(ctx: Context<LockVerificationKey>) -> Result<()> {
        instructions::lock_verification_key::handler(ctx)
    }

    pub fn condense(
        ctx: Context<Condense>,
        recipient: Pubkey,
        proof: Vec<u8>,
        witness: Vec<u8>,
    ) -> Result<()> {
        instructions::condense::handler(ctx, recipient, proof, witness)
    }
}
