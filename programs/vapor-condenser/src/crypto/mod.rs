//! Cryptographic primitives for the condenser
//!
//! - `curve_utils`: BN254 operations over the alt_bn128 syscalls
//! - `groth16_verifier`: proof parsing, `ProofVerifier`, pairing check
//! - `public_inputs`: the circuit's public witness encoding

pub mod curve_utils;
pub mod groth16_verifier;
pub mod public_inputs;

pub use groth16_verifier::{
    validate_verification_key, verify_groth16_proof, Groth16Proof, Groth16Verifier,
    ProofVerifier, PROOF_DATA_LEN,
};
pub use public_inputs::{PublicWitness, PUBLIC_INPUT_COUNT, WITNESS_DATA_LEN};
