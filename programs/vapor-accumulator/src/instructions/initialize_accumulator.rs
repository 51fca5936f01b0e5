//! Initialize Accumulator Instruction
//!
//! Creates the per-mint Merkle tree at the empty-tree root.
//!
//! Only the authority recorded in the mint's Token-2022 `TransferHook`
//! extension may do this, and the extension must route transfers to this
//! program. The tree's `authority` later governs the condenser's
//! verification key, so it has to be someone who already controls the mint.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;
use spl_token_2022::{
    extension::{transfer_hook::TransferHook, BaseStateWithExtensions, StateWithExtensions},
    state::Mint as Token2022Mint,
};

use crate::error::AccumulatorError;
use crate::events::AccumulatorInitialized;
use crate::state::MerkleTree;

#[derive(Accounts)]
#[instruction(tree_depth: u8)]
pub struct InitializeAccumulator<'info> {
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = authority,
        space = MerkleTree::space(tree_depth),
        seeds = [MerkleTree::SEED_PREFIX, mint.key().as_ref()],
        bump
    )]
    pub merkle_tree: Box<Account<'info, MerkleTree>>,

    /// Must be the mint's transfer hook authority
    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeAccumulator>, tree_depth: u8) -> Result<()> {
    let mint = ctx.accounts.mint.key();
    let authority = ctx.accounts.authority.key();

    {
        let mint_info = ctx.accounts.mint.to_account_info();
        let mint_data = mint_info.try_borrow_data()?;
        verify_hook_authority(&mint_data, ctx.program_id, &authority)?;
    }

    let merkle_tree = &mut ctx.accounts.merkle_tree;
    merkle_tree.initialize(mint, authority, tree_depth, ctx.bumps.merkle_tree)?;

    let root = merkle_tree.current_root();

    emit!(AccumulatorInitialized {
        mint,
        authority,
        tree_depth,
        root,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!(
        "Accumulator initialized: depth={}, capacity={}",
        tree_depth,
        merkle_tree.capacity()
    );
    Ok(())
}

/// Check that `mint_data` is a Token-2022 mint whose transfer hook targets
/// `hook_program` and whose hook authority is `signer`.
///
/// # Errors
/// * `MissingTransferHook` if the mint has no transfer hook extension
/// * `HookProgramMismatch` if the hook routes to another program
/// * `Unauthorized` if the hook authority is unset or is not `signer`
pub fn verify_hook_authority(
    mint_data: &[u8],
    hook_program: &Pubkey,
    signer: &Pubkey,
) -> Result<()> {
    let state = StateWithExtensions::<Token2022Mint>::unpack(mint_data)
        .map_err(|_| error!(AccumulatorError::MissingTransferHook))?;
    let hook = state
        .get_extension::<TransferHook>()
        .map_err(|_| error!(AccumulatorError::MissingTransferHook))?;

    require!(
        Option::<Pubkey>::from(hook.program_id) == Some(*hook_program),
        AccumulatorError::HookProgramMismatch
    );
    require!(
        Option::<Pubkey>::from(hook.authority) == Some(*signer),
        AccumulatorError::Unauthorized
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_program::{program_option::COption, program_pack::Pack};
    use spl_token_2022::extension::{BaseStateWithExtensionsMut, ExtensionType, StateWithExtensionsMut};

    fn base_mint() -> Token2022Mint {
        Token2022Mint {
            mint_authority: COption::Some(Pubkey::new_unique()),
            supply: 0,
            decimals: 6,
            is_initialized: true,
            freeze_authority: COption::None,
        }
    }

    /// Token-2022 mint bytes carrying a transfer hook extension.
    fn hooked_mint(authority: Option<Pubkey>, program_id: Pubkey) -> Vec<u8> {
        let len = ExtensionType::try_calculate_account_len::<Token2022Mint>(&[
            ExtensionType::TransferHook,
        ])
        .unwrap();
        let mut data = vec![0u8; len];

        let mut state = StateWithExtensionsMut::<Token2022Mint>::unpack_uninitialized(&mut data).unwrap();
        let hook = state.init_extension::<TransferHook>(true).unwrap();
        hook.authority = authority.try_into().unwrap();
        hook.program_id = Some(program_id).try_into().unwrap();
        state.base = base_mint();
        state.pack_base();
        state.init_account_type().unwrap();

        data
    }

    fn error_code(result: Result<()>) -> u32 {
        match result {
            Err(anchor_lang::error::Error::AnchorError(e)) => e.error_code_number,
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_hook_authority_accepted() {
        let authority = Pubkey::new_unique();
        let data = hooked_mint(Some(authority), crate::ID);
        assert!(verify_hook_authority(&data, &crate::ID, &authority).is_ok());
    }

    #[test]
    fn test_stranger_rejected() {
        let authority = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let data = hooked_mint(Some(authority), crate::ID);

        assert_eq!(
            error_code(verify_hook_authority(&data, &crate::ID, &stranger)),
            u32::from(AccumulatorError::Unauthorized)
        );
    }

    #[test]
    fn test_unset_hook_authority_rejected() {
        let signer = Pubkey::new_unique();
        let data = hooked_mint(None, crate::ID);

        assert_eq!(
            error_code(verify_hook_authority(&data, &crate::ID, &signer)),
            u32::from(AccumulatorError::Unauthorized)
        );
    }

    #[test]
    fn test_hook_to_other_program_rejected() {
        let authority = Pubkey::new_unique();
        let data = hooked_mint(Some(authority), Pubkey::new_unique());

        assert_eq!(
            error_code(verify_hook_authority(&data, &crate::ID, &authority)),
            u32::from(AccumulatorError::HookProgramMismatch)
        );
    }

    #[test]
    fn test_mint_without_hook_rejected() {
        let mut data = vec![0u8; Token2022Mint::LEN];
        Token2022Mint::pack(base_mint(), &mut data).unwrap();

        assert_eq!(
            error_code(verify_hook_authority(&data, &crate::ID, &Pubkey::new_unique())),
            u32::from(AccumulatorError::MissingTransferHook)
        );
    }
}
