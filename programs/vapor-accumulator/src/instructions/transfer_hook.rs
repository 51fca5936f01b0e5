//! Transfer Hook Instruction
//!
//! Invoked by Token-2022 through the transfer-hook interface on every
//! transfer of the mint. Records `(destination owner, amount)` as a leaf
//! in the mint's accumulator. Any failure here fails the transfer.
//!
//! Account order is fixed by the interface: source, mint, destination,
//! owner, extra account meta list, then the extras it resolves.

use std::cell::RefMut;

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount};
use spl_token_2022::{
    extension::{
        transfer_hook::TransferHookAccount, BaseStateWithExtensionsMut, StateWithExtensionsMut,
    },
    state::Account as Token2022Account,
};

use crate::crypto::poseidon;
use crate::error::AccumulatorError;
use crate::events::TransferRecorded;
use crate::state::{MerkleTree, EXTRA_ACCOUNT_METAS_SEED};

#[derive(Accounts)]
pub struct TransferHook<'info> {
    #[account(token::mint = mint)]
    pub source_token: InterfaceAccount<'info, TokenAccount>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(token::mint = mint)]
    pub destination_token: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: source owner or delegate, already authorized by Token-2022
    pub owner: UncheckedAccount<'info>,

    /// CHECK: ExtraAccountMetaList account, only its address is checked
    #[account(seeds = [EXTRA_ACCOUNT_METAS_SEED, mint.key().as_ref()], bump)]
    pub extra_account_meta_list: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [MerkleTree::SEED_PREFIX, mint.key().as_ref()],
        bump = merkle_tree.bump,
        constraint = merkle_tree.mint == mint.key() @ AccumulatorError::MintMismatch
    )]
    pub merkle_tree: Box<Account<'info, MerkleTree>>,
}

pub fn handler(ctx: Context<TransferHook>, amount: u64) -> Result<()> {
    check_is_transferring(&ctx)?;

    let to = ctx.accounts.destination_token.owner;
    let leaf = poseidon::hash_transfer_leaf(&to, amount)?;

    let merkle_tree = &mut ctx.accounts.merkle_tree;
    let appended = merkle_tree.append(leaf)?;

    emit!(TransferRecorded {
        mint: ctx.accounts.mint.key(),
        to,
        amount,
        leaf,
        leaf_index: appended.leaf_index,
        root: appended.root,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!(
        "Transfer recorded: index={}, root={:?}",
        appended.leaf_index,
        &appended.root[..8]
    );
    Ok(())
}

/// Fails unless Token-2022 set the source account's `transferring` flag,
/// which only happens for the duration of a real transfer.
fn check_is_transferring(ctx: &Context<TransferHook>) -> Result<()> {
    let source_token_info = ctx.accounts.source_token.to_account_info();
    let mut account_data_ref: RefMut<&mut [u8]> = source_token_info.try_borrow_mut_data()?;
    let mut account = StateWithExtensionsMut::<Token2022Account>::unpack(*account_data_ref)?;
    let account_extension = account.get_extension_mut::<TransferHookAccount>()?;

    require!(
        bool::from(account_extension.transferring),
        AccumulatorError::IsNotCurrentlyTransferring
    );

    Ok(())
}
