//! Set Verification Key Instruction
//!
//! Lets the accumulator authority store or replace the mint's Groth16
//! verification key until it is locked. The accumulator only accepts the
//! mint's transfer hook authority as its tree authority.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;
use vapor_accumulator::state::MerkleTree;

use crate::crypto::validate_verification_key;
use crate::error::CondenserError;
use crate::events::VerificationKeySet;
use crate::state::{VerificationKey, VerificationKeyAccount};

#[derive(Accounts)]
pub struct SetVerificationKey<'info> {
    pub mint: InterfaceAccount<'info, Mint>,

    /// Accumulator tree; its authority governs the VK.
    #[account(
        seeds = [MerkleTree::SEED_PREFIX, mint.key().as_ref()],
        bump = merkle_tree.bump,
        seeds::program = vapor_accumulator::ID,
        has_one = authority @ CondenserError::Unauthorized,
    )]
    pub merkle_tree: Box<Account<'info, MerkleTree>>,

    #[account(
        init_if_needed,
        payer = authority,
        space = VerificationKeyAccount::LEN,
        seeds = [VerificationKeyAccount::SEED_PREFIX, mint.key().as_ref()],
        bump
    )]
    pub verification_key: Box<Account<'info, VerificationKeyAccount>>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<SetVerificationKey>,
    vk_alpha_g1: [u8; 64],
    vk_beta_g2: [u8; 128],
    vk_gamma_g2: [u8; 128],
    vk_delta_g2: [u8; 128],
    vk_ic: Vec<[u8; 64]>,
) -> Result<()> {
    let verification_key = &mut ctx.accounts.verification_key;

    require!(
        !verification_key.is_locked,
        CondenserError::VerificationKeyLocked
    );

    let vk = VerificationKey {
        alpha_g1: vk_alpha_g1,
        beta_g2: vk_beta_g2,
        gamma_g2: vk_gamma_g2,
        delta_g2: vk_delta_g2,
        ic: vk_ic,
    };
    validate_verification_key(&vk)?;

    let ic_length = vk.ic.len() as u8;
    verification_key.set_vk(
        ctx.accounts.mint.key(),
        ctx.accounts.authority.key(),
        vk,
        ctx.bumps.verification_key,
    );

    emit!(VerificationKeySet {
        mint: ctx.accounts.mint.key(),
        authority: ctx.accounts.authority.key(),
        ic_length,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Verification key set, IC points: {}", ic_length);
    Ok(())
}
