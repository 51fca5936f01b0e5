//! Lock Verification Key Instruction
//!
//! Freezes the mint's verification key. Irreversible.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;
use vapor_accumulator::state::MerkleTree;

use crate::error::CondenserError;
use crate::events::VerificationKeyLocked;
use crate::state::VerificationKeyAccount;

#[derive(Accounts)]
pub struct LockVerificationKey<'info> {
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        seeds = [MerkleTree::SEED_PREFIX, mint.key().as_ref()],
        bump = merkle_tree.bump,
        seeds::program = vapor_accumulator::ID,
        has_one = authority @ CondenserError::Unauthorized,
    )]
    pub merkle_tree: Box<Account<'info, MerkleTree>>,

    #[account(
        mut,
        seeds = [VerificationKeyAccount::SEED_PREFIX, mint.key().as_ref()],
        bump = verification_key.bump,
        constraint = verification_key.is_valid() @ CondenserError::VerificationKeyNotSet,
    )]
    pub verification_key: Box<Account<'info, VerificationKeyAccount>>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<LockVerificationKey>) -> Result<()> {
    let verification_key = &mut ctx.accounts.verification_key;

    require!(
        !verification_key.is_locked,
        CondenserError::VerificationKeyLocked
    );
    verification_key.lock();

    emit!(VerificationKeyLocked {
        mint: ctx.accounts.mint.key(),
        authority: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Verification key locked");
    Ok(())
}
