//! Condense Instruction
//!
//! Releases accumulated value to a recipient against a Groth16 proof that
//! the recipient's transfers in the accumulator total `amount`.
//!
//! # Flow
//! 1. Parse the public witness (an undecodable witness is an invalid proof)
//! 2. Require the witness root to be the live accumulator root
//! 3. Verify the proof
//! 4. Check the witness recipient and the cumulative entitlement
//! 5. Raise the recipient's released total, then mint the difference
//!
//! Steps 1-4 touch no state. Step 5 runs in the same transaction as the
//! mint, so a failed CPI rolls back the tracker too.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, MintTo, TokenAccount, TokenInterface};
use vapor_accumulator::state::MerkleTree;

use crate::crypto::{Groth16Verifier, ProofVerifier, PublicWitness};
use crate::error::CondenserError;
use crate::events::Condensed;
use crate::state::{
    VerificationKey, VerificationKeyAccount, WithdrawnTracker, MINT_AUTHORITY_SEED,
};

#[derive(Accounts)]
#[instruction(recipient: Pubkey)]
pub struct Condense<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(mut, mint::token_program = token_program)]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        token::mint = mint,
        token::token_program = token_program,
        constraint = to.owner == recipient @ CondenserError::RecipientMismatch,
    )]
    pub to: InterfaceAccount<'info, TokenAccount>,

    #[account(
        seeds = [MerkleTree::SEED_PREFIX, mint.key().as_ref()],
        bump = merkle_tree.bump,
        seeds::program = vapor_accumulator::ID,
    )]
    pub merkle_tree: Box<Account<'info, MerkleTree>>,

    #[account(
        seeds = [VerificationKeyAccount::SEED_PREFIX, mint.key().as_ref()],
        bump = verification_key.bump,
        constraint = verification_key.is_valid() @ CondenserError::VerificationKeyNotSet,
    )]
    pub verification_key: Box<Account<'info, VerificationKeyAccount>>,

    #[account(
        init_if_needed,
        payer = payer,
        space = WithdrawnTracker::LEN,
        seeds = [WithdrawnTracker::SEED_PREFIX, mint.key().as_ref(), recipient.as_ref()],
        bump
    )]
    pub withdrawn: Account<'info, WithdrawnTracker>,

    /// CHECK: PDA signer for mint_to, holds no data
    #[account(seeds = [MINT_AUTHORITY_SEED, mint.key().as_ref()], bump)]
    pub mint_authority: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

/// Outcome of an accepted condense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Release {
    /// Amount to mint now
    pub amount: u64,
    /// Recipient's released total after this call
    pub total_withdrawn: u64,
    /// Root the proof was checked against
    pub root: [u8; 32],
}

/// Run one condense against `live_root` and the recipient's tracker.
///
/// On success the tracker already holds the new total and the caller must
/// mint `Release::amount`. On error the tracker is unchanged.
pub fn process_condense<V: ProofVerifier>(
    verifier: &V,
    live_root: &[u8; 32],
    tracker: &mut WithdrawnTracker,
    recipient: &Pubkey,
    proof: &[u8],
    witness_bytes: &[u8],
) -> Result<Release> {
    // ========== VERIFY ==========

    // A witness that does not decode cannot be proven against
    let witness = PublicWitness::from_bytes(witness_bytes).map_err(reject_witness)?;
    let root = witness.root();

    require!(root == *live_root, CondenserError::StaleRoot);
    require!(
        verifier.verify(proof, &witness, live_root),
        CondenserError::InvalidProof
    );

    require_keys_eq!(
        witness.recipient().map_err(reject_witness)?,
        *recipient,
        CondenserError::RecipientMismatch
    );

    // ========== ENTITLEMENT ==========

    let proven_total = witness.amount().map_err(reject_witness)?;
    let already = tracker.total();

    require!(proven_total != already, CondenserError::NothingToWithdraw);
    require!(
        proven_total > already,
        CondenserError::InsufficientAccumulatedBalance
    );

    let amount = proven_total
        .checked_sub(already)
        .ok_or(error!(CondenserError::ArithmeticOverflow))?;

    // ========== COMMIT ==========

    let total_withdrawn = tracker.increase(amount)?;

    Ok(Release {
        amount,
        total_withdrawn,
        root,
    })
}

fn reject_witness(err: anchor_lang::error::Error) -> anchor_lang::error::Error {
    msg!("Rejecting undecodable witness: {}", err);
    error!(CondenserError::InvalidProof)
}

pub fn handler(
    ctx: Context<Condense>,
    recipient: Pubkey,
    proof: Vec<u8>,
    witness: Vec<u8>,
) -> Result<()> {
    let mint_key = ctx.accounts.mint.key();
    let live_root = ctx.accounts.merkle_tree.current_root();
    let verifier = Groth16Verifier::new(VerificationKey::from(&**ctx.accounts.verification_key));

    let withdrawn = &mut ctx.accounts.withdrawn;
    withdrawn.bind(mint_key, recipient, ctx.bumps.withdrawn)?;

    let release = process_condense(
        &verifier,
        &live_root,
        withdrawn,
        &recipient,
        &proof,
        &witness,
    )?;

    // ========== MINT ==========

    let signer_seeds: &[&[&[u8]]] = &[&[
        MINT_AUTHORITY_SEED,
        mint_key.as_ref(),
        &[ctx.bumps.mint_authority],
    ]];

    token_interface::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.to.to_account_info(),
                authority: ctx.accounts.mint_authority.to_account_info(),
            },
            signer_seeds,
        ),
        release.amount,
    )?;

    emit!(Condensed {
        mint: mint_key,
        recipient,
        amount: release.amount,
        total_withdrawn: release.total_withdrawn,
        root: release.root,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!(
        "Condensed {} (total {}) against root {:?}",
        release.amount,
        release.total_withdrawn,
        &release.root[..8]
    );
    Ok(())
}
