//! Initialize Release Hooks Instruction
//!
//! Provisions the `ExtraAccountMetaList` Token-2022 reads on every transfer
//! of the mint, so the hook receives the mint's Merkle tree as a writable
//! extra account.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;
use spl_tlv_account_resolution::{
    account::ExtraAccountMeta, seeds::Seed, state::ExtraAccountMetaList,
};
use spl_transfer_hook_interface::instruction::ExecuteInstruction;

use crate::events::ReleaseHooksInitialized;
use crate::state::{MerkleTree, EXTRA_ACCOUNT_METAS_SEED};

/// Index of the mint in the Execute instruction's account list
const MINT_ACCOUNT_INDEX: u8 = 1;

#[derive(Accounts)]
pub struct InitializeReleaseHooks<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: ExtraAccountMetaList account, written as TLV data below
    #[account(
        init,
        payer = payer,
        space = ExtraAccountMetaList::size_of(extra_account_metas()?.len())?,
        seeds = [EXTRA_ACCOUNT_METAS_SEED, mint.key().as_ref()],
        bump
    )]
    pub extra_account_meta_list: UncheckedAccount<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    pub system_program: Program<'info, System>,
}

/// Extra accounts appended to every Execute call: the mint's Merkle tree,
/// resolved from `["merkle_tree", mint]`.
pub fn extra_account_metas() -> Result<Vec<ExtraAccountMeta>> {
    Ok(vec![ExtraAccountMeta::new_with_seeds(
        &[
            Seed::Literal {
                bytes: MerkleTree::SEED_PREFIX.to_vec(),
            },
            Seed::AccountKey {
                index: MINT_ACCOUNT_INDEX,
            },
        ],
        false, // is_signer
        true,  // is_writable
    )?])
}

pub fn handler(ctx: Context<InitializeReleaseHooks>) -> Result<()> {
    let metas = extra_account_metas()?;

    ExtraAccountMetaList::init::<ExecuteInstruction>(
        &mut ctx.accounts.extra_account_meta_list.try_borrow_mut_data()?,
        &metas,
    )?;

    emit!(ReleaseHooksInitialized {
        mint: ctx.accounts.mint.key(),
        extra_account_meta_list: ctx.accounts.extra_account_meta_list.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Release hooks initialized with {} extra account(s)", metas.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_writable_tree_meta() {
        let metas = extra_account_metas().unwrap();
        assert_eq!(metas.len(), 1);
        assert!(!bool::from(metas[0].is_signer));
        assert!(bool::from(metas[0].is_writable));
    }

    #[test]
    fn test_meta_list_size_is_stable() {
        let len = extra_account_metas().unwrap().len();
        let size = ExtraAccountMetaList::size_of(len).unwrap();
        // TLV header (8 discriminator + 4 length) + pod slice len (4) + 35 per meta
        assert_eq!(size, 8 + 4 + 4 + 35);
    }
}
