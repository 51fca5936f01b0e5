//! Groth16 Zero-Knowledge Proof Verifier
//!
//! Verifies condense proofs with Solana's alt_bn128 syscalls.
//!
//! ## Verification Equation
//! ```text
//! e(-A, B) · e(α, β) · e(vk_x, γ) · e(C, δ) = 1
//! ```
//!
//! Where:
//! - (A, B, C) are the proof elements
//! - (α, β, γ, δ) are from the verification key
//! - vk_x = IC[0] + Σ(public_input[i] · IC[i+1])
//!
//! ## Proof Encoding
//! gnark's raw Groth16 layout with an empty commitment section:
//! ```text
//! [0..64]    A (G1)
//! [64..192]  B (G2)
//! [192..256] C (G1)
//! [256..260] commitment count (u32 BE) = 0
//! [260..324] commitment proof of knowledge (G1) = zero
//! ```

use anchor_lang::prelude::*;

use crate::error::CondenserError;
use crate::state::verification_key::VerificationKey;

use super::curve_utils::{
    compute_vk_x, is_g1_identity, is_g2_identity, make_pairing_element, negate_g1,
    validate_g1_point, validate_g2_point, verify_pairing, G1Point, G2Point, PairingElement,
};
use super::public_inputs::{PublicWitness, PUBLIC_INPUT_COUNT};

// ============================================================================
// PROOF STRUCTURE
// ============================================================================

/// Offset of the commitment section.
const COMMITMENTS_OFFSET: usize = 256;

/// Expected proof data length in bytes.
pub const PROOF_DATA_LEN: usize = COMMITMENTS_OFFSET + 4 + 64;

/// Groth16 proof: A, C ∈ G1 and B ∈ G2.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Groth16Proof {
    pub a: G1Point,
    pub b: G2Point,
    pub c: G1Point,
}

impl Groth16Proof {
    /// Parse proof from raw bytes.
    ///
    /// Rejects any proof carrying commitments: the condense circuit has none.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        require!(data.len() == PROOF_DATA_LEN, CondenserError::InvalidProof);
        require!(
            data[COMMITMENTS_OFFSET..].iter().all(|&b| b == 0),
            CondenserError::InvalidProof
        );

        let mut proof = Groth16Proof {
            a: [0u8; 64],
            b: [0u8; 128],
            c: [0u8; 64],
        };

        proof.a.copy_from_slice(&data[0..64]);
        proof.b.copy_from_slice(&data[64..192]);
        proof.c.copy_from_slice(&data[192..256]);

        Ok(proof)
    }

    /// Serialize proof to bytes.
    pub fn to_bytes(&self) -> [u8; PROOF_DATA_LEN] {
        let mut bytes = [0u8; PROOF_DATA_LEN];
        bytes[0..64].copy_from_slice(&self.a);
        bytes[64..192].copy_from_slice(&self.b);
        bytes[192..256].copy_from_slice(&self.c);
        bytes
    }
}

// ============================================================================
// VERIFIER INTERFACE
// ============================================================================

/// Boolean proof check used by the condense processor.
pub trait ProofVerifier {
    /// Returns true only if `proof` is valid for `witness` and the witness
    /// root equals `expected_root`.
    fn verify(&self, proof: &[u8], witness: &PublicWitness, expected_root: &[u8; 32]) -> bool;
}

/// Groth16 verifier bound to one mint's verification key.
pub struct Groth16Verifier {
    vk: VerificationKey,
}

impl Groth16Verifier {
    pub fn new(vk: VerificationKey) -> Self {
        Self { vk }
    }
}

impl ProofVerifier for Groth16Verifier {
    fn verify(&self, proof: &[u8], witness: &PublicWitness, expected_root: &[u8; 32]) -> bool {
        if witness.root() != *expected_root {
            msg!("Witness root does not match expected root");
            return false;
        }

        match verify_groth16_proof(proof, &self.vk, witness) {
            Ok(valid) => {
                if !valid {
                    msg!("Pairing check failed");
                }
                valid
            }
            Err(e) => {
                msg!("Proof rejected: {}", e);
                false
            }
        }
    }
}

// ============================================================================
// VERIFICATION FUNCTION
// ============================================================================

/// Verify a Groth16 proof against `vk` and the witness inputs.
///
/// # Returns
/// * `Ok(true)` - pairing check passed
/// * `Ok(false)` - pairing check failed
/// * `Err(...)` - malformed proof or key
pub fn verify_groth16_proof(
    proof_bytes: &[u8],
    vk: &VerificationKey,
    witness: &PublicWitness,
) -> Result<bool> {
    let proof = Groth16Proof::from_bytes(proof_bytes)?;
    validate_proof_points(&proof)?;

    require!(
        vk.ic.len() == PUBLIC_INPUT_COUNT + 1,
        CondenserError::InvalidVerificationKey
    );

    let vk_x = compute_vk_x(&vk.ic, witness.field_elements())?;
    let neg_a = negate_g1(&proof.a);

    let pairing_elements: [PairingElement; 4] = [
        make_pairing_element(&neg_a, &proof.b),          // e(-A, B)
        make_pairing_element(&vk.alpha_g1, &vk.beta_g2), // e(α, β)
        make_pairing_element(&vk_x, &vk.gamma_g2),       // e(vk_x, γ)
        make_pairing_element(&proof.c, &vk.delta_g2),    // e(C, δ)
    ];

    verify_pairing(&pairing_elements)
}

// ============================================================================
// VALIDATION HELPERS
// ============================================================================

/// A, B, C must be non-identity; A and C on curve; B in field range.
fn validate_proof_points(proof: &Groth16Proof) -> Result<()> {
    require!(!is_g1_identity(&proof.a), CondenserError::InvalidProof);
    validate_g1_point(&proof.a)?;

    require!(!is_g2_identity(&proof.b), CondenserError::InvalidProof);
    validate_g2_point(&proof.b)?;

    require!(!is_g1_identity(&proof.c), CondenserError::InvalidProof);
    validate_g1_point(&proof.c)?;

    Ok(())
}

/// Validate verification key structure and values.
///
/// # Errors
/// * `InvalidVerificationKey` on wrong IC count, identity α/β/γ/δ, or any
///   point off curve or out of field range
pub fn validate_verification_key(vk: &VerificationKey) -> Result<()> {
    require!(
        vk.ic.len() == PUBLIC_INPUT_COUNT + 1,
        CondenserError::InvalidVerificationKey
    );
    require!(
        !is_g1_identity(&vk.alpha_g1)
            && !is_g2_identity(&vk.beta_g2)
            && !is_g2_identity(&vk.gamma_g2)
            && !is_g2_identity(&vk.delta_g2),
        CondenserError::InvalidVerificationKey
    );

    let g1_points = std::iter::once(&vk.alpha_g1).chain(vk.ic.iter());
    for point in g1_points {
        validate_g1_point(point).map_err(|_| error!(CondenserError::InvalidVerificationKey))?;
    }

    for point in [&vk.beta_g2, &vk.gamma_g2, &vk.delta_g2] {
        validate_g2_point(point).map_err(|_| error!(CondenserError::InvalidVerificationKey))?;
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proof_parsing() {
        let mut data = [0u8; PROOF_DATA_LEN];
        data[..256].fill(1);
        let proof = Groth16Proof::from_bytes(&data).unwrap();

        assert_eq!(proof.a, [1u8; 64]);
        assert_eq!(proof.b, [1u8; 128]);
        assert_eq!(proof.c, [1u8; 64]);
        assert_eq!(proof.to_bytes(), data);
    }

    #[test]
    fn test_invalid_proof_length() {
        assert!(Groth16Proof::from_bytes(&[0u8; 256]).is_err());
        assert!(Groth16Proof::from_bytes(&[0u8; 325]).is_err());
    }

    #[test]
    fn test_commitments_rejected() {
        let mut data = [0u8; PROOF_DATA_LEN];
        data[259] = 1; // one commitment
        assert!(Groth16Proof::from_bytes(&data).is_err());

        let mut data = [0u8; PROOF_DATA_LEN];
        data[323] = 1; // non-zero proof of knowledge
        assert!(Groth16Proof::from_bytes(&data).is_err());
    }

    #[test]
    fn test_identity_points_rejected() {
        let proof = Groth16Proof {
            a: [0u8; 64],
            b: [1u8; 128],
            c: [0u8; 64],
        };
        assert!(validate_proof_points(&proof).is_err());
    }

    #[test]
    fn test_empty_key_rejected() {
        let vk = VerificationKey {
            alpha_g1: [0u8; 64],
            beta_g2: [0u8; 128],
            gamma_g2: [0u8; 128],
            delta_g2: [0u8; 128],
            ic: vec![[0u8; 64]; PUBLIC_INPUT_COUNT + 1],
        };
        assert!(validate_verification_key(&vk).is_err());
    }
}
