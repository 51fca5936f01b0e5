//! Verification Key storage for Groth16 proofs
//!
//! One key per mint, set by the accumulator authority. Once locked the key
//! can never change again.

use anchor_lang::prelude::*;

use crate::crypto::PUBLIC_INPUT_COUNT;

/// Number of IC points for the condense circuit
pub const VK_IC_LEN: usize = PUBLIC_INPUT_COUNT + 1;

/// Groth16 Verification Key account.
///
/// PDA Seeds: `[b"verification_key", mint.key().as_ref()]`
#[account]
pub struct VerificationKeyAccount {
    /// Mint whose condense proofs this key verifies
    pub mint: Pubkey,

    /// Authority that last set the key
    pub authority: Pubkey,

    /// α ∈ G1
    pub vk_alpha_g1: [u8; 64],

    /// β ∈ G2
    pub vk_beta_g2: [u8; 128],

    /// γ ∈ G2
    pub vk_gamma_g2: [u8; 128],

    /// δ ∈ G2
    pub vk_delta_g2: [u8; 128],

    /// IC points ∈ G1, IC[0] + Σ(public_input[i] * IC[i+1])
    pub vk_ic: Vec<[u8; 64]>,

    /// Whether this VK has been set
    pub is_initialized: bool,

    /// Whether this VK is frozen
    pub is_locked: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl Default for VerificationKeyAccount {
    fn default() -> Self {
        Self {
            mint: Pubkey::default(),
            authority: Pubkey::default(),
            vk_alpha_g1: [0u8; 64],
            vk_beta_g2: [0u8; 128],
            vk_gamma_g2: [0u8; 128],
            vk_delta_g2: [0u8; 128],
            vk_ic: Vec::new(),
            is_initialized: false,
            is_locked: false,
            bump: 0,
        }
    }
}

impl VerificationKeyAccount {
    /// Seed prefix for PDA derivation
    pub const SEED_PREFIX: &'static [u8] = b"verification_key";

    /// Calculate space for VK account.
    pub const fn space(ic_points: usize) -> usize {
        8                                   // discriminator
            + 32                            // mint
            + 32                            // authority
            + 64                            // vk_alpha_g1
            + 128                           // vk_beta_g2
            + 128                           // vk_gamma_g2
            + 128                           // vk_delta_g2
            + 4 + (64 * ic_points)          // vk_ic (vec)
            + 1                             // is_initialized
            + 1                             // is_locked
            + 1                             // bump
    }

    /// Space for the condense circuit's key
    pub const LEN: usize = Self::space(VK_IC_LEN);

    /// Derive the PDA address for a mint's VK
    pub fn find_pda(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::SEED_PREFIX, mint.as_ref()], program_id)
    }

    /// Store the verification key data.
    pub fn set_vk(
        &mut self,
        mint: Pubkey,
        authority: Pubkey,
        vk: VerificationKey,
        bump: u8,
    ) {
        self.mint = mint;
        self.authority = authority;
        self.vk_alpha_g1 = vk.alpha_g1;
        self.vk_beta_g2 = vk.beta_g2;
        self.vk_gamma_g2 = vk.gamma_g2;
        self.vk_delta_g2 = vk.delta_g2;
        self.vk_ic = vk.ic;
        self.is_initialized = true;
        self.bump = bump;
    }

    /// Freeze the key permanently.
    pub fn lock(&mut self) {
        self.is_locked = true;
    }

    /// Check if VK is set and has the expected IC count
    pub fn is_valid(&self) -> bool {
        self.is_initialized && self.vk_ic.len() == VK_IC_LEN
    }
}

/// Groth16 VK in the form the verifier consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationKey {
    pub alpha_g1: [u8; 64],
    pub beta_g2: [u8; 128],
    pub gamma_g2: [u8; 128],
    pub delta_g2: [u8; 128],
    pub ic: Vec<[u8; 64]>,
}

impl From<&VerificationKeyAccount> for VerificationKey {
    fn from(account: &VerificationKeyAccount) -> Self {
        VerificationKey {
            alpha_g1: account.vk_alpha_g1,
            beta_g2: account.vk_beta_g2,
            gamma_g2: account.vk_gamma_g2,
            delta_g2: account.vk_delta_g2,
            ic: account.vk_ic.clone(),
        }
    }
}
