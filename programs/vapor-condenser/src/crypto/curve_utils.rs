//! BN254 curve operations for Groth16 verification
//!
//! Thin wrappers over Solana's alt_bn128 syscalls plus the field-range and
//! on-curve checks the syscalls leave to the caller.
//!
//! ## Curve Parameters
//! - Base field: Fp with p = 21888242871839275222246405745257275088696311157297823662689037894645226208583
//! - Scalar field: Fr with r = 21888242871839275222246405745257275088548364400416034343698204186575808495617
//! - Curve equation: y² = x³ + 3
//!
//! ## Point Representations (big-endian)
//! - G1: 64 bytes, `x || y`
//! - G2: 128 bytes, `x.c1 || x.c0 || y.c1 || y.c0`

use anchor_lang::prelude::*;
use num_bigint::BigUint;
use num_traits::Zero;
use solana_program::alt_bn128::{
    prelude::{alt_bn128_addition, alt_bn128_multiplication, alt_bn128_pairing},
    AltBn128Error,
};

use crate::error::CondenserError;

// ============================================================================
// BN254 CURVE PARAMETERS
// ============================================================================

/// BN254 base field modulus (p) - big-endian bytes
pub const BN254_FIELD_MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29,
    0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x97, 0x81, 0x6a, 0x91, 0x68, 0x71, 0xca, 0x8d,
    0x3c, 0x20, 0x8c, 0x16, 0xd8, 0x7c, 0xfd, 0x47,
];

/// BN254 scalar field modulus (r) - big-endian bytes
pub const BN254_SCALAR_MODULUS: [u8; 32] = [
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29,
    0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91,
    0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
];

/// G1 point (64 bytes: x || y, big-endian).
pub type G1Point = [u8; 64];

/// G2 point (128 bytes).
pub type G2Point = [u8; 128];

/// Scalar field element (32 bytes, big-endian).
pub type ScalarField = [u8; 32];

/// Input element for pairing operation (G1 point || G2 point = 192 bytes).
pub type PairingElement = [u8; 192];

// ============================================================================
// FIELD CHECKS
// ============================================================================

/// Big-endian byte comparison against a 32-byte modulus.
#[inline]
fn is_below(value: &[u8], modulus: &[u8; 32]) -> bool {
    value < modulus.as_slice()
}

/// Check if scalar is less than the scalar field modulus.
pub fn is_valid_scalar(scalar: &ScalarField) -> bool {
    is_below(scalar, &BN254_SCALAR_MODULUS)
}

/// Check if a base field element is less than p.
pub fn is_valid_base_field(element: &[u8]) -> bool {
    element.len() == 32 && is_below(element, &BN254_FIELD_MODULUS)
}

// ============================================================================
// G1 POINT OPERATIONS
// ============================================================================

/// Check if a G1 point is the identity (point at infinity).
pub fn is_g1_identity(point: &G1Point) -> bool {
    point.iter().all(|&b| b == 0)
}

/// Validate that a G1 point is on the BN254 curve.
///
/// The identity (all zeros) is accepted here; callers that must reject it
/// check [`is_g1_identity`] first.
pub fn validate_g1_point(point: &G1Point) -> Result<()> {
    if is_g1_identity(point) {
        return Ok(());
    }

    require!(
        is_valid_base_field(&point[0..32]) && is_valid_base_field(&point[32..64]),
        CondenserError::InvalidProof
    );

    let x = BigUint::from_bytes_be(&point[0..32]);
    let y = BigUint::from_bytes_be(&point[32..64]);
    let p = BigUint::from_bytes_be(&BN254_FIELD_MODULUS);

    // y² = x³ + 3 (mod p)
    let y_squared = (&y * &y) % &p;
    let rhs = (&x * &x * &x + BigUint::from(3u32)) % &p;

    require!(y_squared == rhs, CondenserError::InvalidProof);

    Ok(())
}

/// Negate a G1 point: -P = (x, p - y).
pub fn negate_g1(point: &G1Point) -> G1Point {
    if is_g1_identity(point) {
        return *point;
    }

    let y = BigUint::from_bytes_be(&point[32..64]);
    let p = BigUint::from_bytes_be(&BN254_FIELD_MODULUS);
    let neg_y = if y.is_zero() { y } else { &p - &y };

    let mut result = [0u8; 64];
    result[0..32].copy_from_slice(&point[0..32]);

    let neg_y_bytes = neg_y.to_bytes_be();
    let len = neg_y_bytes.len().min(32);
    result[64 - len..].copy_from_slice(&neg_y_bytes[neg_y_bytes.len() - len..]);

    result
}

/// Add two G1 points using the alt_bn128 addition syscall.
pub fn g1_add(a: &G1Point, b: &G1Point) -> Result<G1Point> {
    let mut input = [0u8; 128];
    input[0..64].copy_from_slice(a);
    input[64..128].copy_from_slice(b);

    let result = alt_bn128_addition(&input).map_err(map_bn128_error)?;
    to_g1(&result)
}

/// Multiply a G1 point by a big-endian scalar using the alt_bn128 syscall.
pub fn g1_scalar_mul(point: &G1Point, scalar: &ScalarField) -> Result<G1Point> {
    let mut input = [0u8; 96];
    input[0..64].copy_from_slice(point);
    input[64..96].copy_from_slice(scalar);

    let result = alt_bn128_multiplication(&input).map_err(map_bn128_error)?;
    to_g1(&result)
}

fn to_g1(bytes: &[u8]) -> Result<G1Point> {
    require!(bytes.len() == 64, CondenserError::InvalidProof);
    let mut output = [0u8; 64];
    output.copy_from_slice(bytes);
    Ok(output)
}

// ============================================================================
// G2 POINT OPERATIONS
// ============================================================================

/// Check if a G2 point is the identity.
pub fn is_g2_identity(point: &G2Point) -> bool {
    point.iter().all(|&b| b == 0)
}

/// Range check for G2 coordinates.
///
/// On-curve and subgroup membership for G2 are enforced by the pairing
/// syscall, which rejects invalid points.
pub fn validate_g2_point(point: &G2Point) -> Result<()> {
    for component in point.chunks_exact(32) {
        require!(is_valid_base_field(component), CondenserError::InvalidProof);
    }
    Ok(())
}

// ============================================================================
// PAIRING OPERATIONS
// ============================================================================

/// Construct a pairing element from G1 and G2 points.
pub fn make_pairing_element(g1: &G1Point, g2: &G2Point) -> PairingElement {
    let mut element = [0u8; 192];
    element[0..64].copy_from_slice(g1);
    element[64..192].copy_from_slice(g2);
    element
}

/// Check `∏ e(G1[i], G2[i]) = 1` with the alt_bn128 pairing syscall.
pub fn verify_pairing(elements: &[PairingElement]) -> Result<bool> {
    let mut input = Vec::with_capacity(elements.len() * 192);
    for elem in elements {
        input.extend_from_slice(elem);
    }

    let result = alt_bn128_pairing(&input).map_err(map_bn128_error)?;

    // 32-byte big-endian boolean
    Ok(result.len() == 32 && result[31] == 1 && result[..31].iter().all(|&b| b == 0))
}

// ============================================================================
// VK_X COMPUTATION
// ============================================================================

/// Compute vk_x = IC[0] + Σ(public_input[i] * IC[i+1]).
pub fn compute_vk_x(ic: &[G1Point], public_inputs: &[ScalarField]) -> Result<G1Point> {
    require!(
        ic.len() == public_inputs.len() + 1,
        CondenserError::InvalidVerificationKey
    );

    let mut acc = ic[0];
    for (input, point) in public_inputs.iter().zip(&ic[1..]) {
        let term = g1_scalar_mul(point, input)?;
        acc = g1_add(&acc, &term)?;
    }

    Ok(acc)
}

fn map_bn128_error(e: AltBn128Error) -> anchor_lang::error::Error {
    msg!("BN254 operation failed: {:?}", e);
    error!(CondenserError::InvalidProof)
}

// ============================================================================
// TESTS
// ============================================================================
