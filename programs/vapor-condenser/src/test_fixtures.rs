//! Groth16 fixtures built from a known trapdoor
//!
//! Choosing α, β, γ, δ and the IC scalars directly lets tests solve for a
//! proof `(A, B, C)` that satisfies the pairing equation for any witness:
//!
//! ```text
//! c = (a·b - α·β - s·γ) / δ,   s = ic0 + Σ x_i · ic_{i+1}
//! ```

use ark_bn254::{Fq, Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInteger, Field, PrimeField};

use crate::crypto::{Groth16Proof, PublicWitness, PUBLIC_INPUT_COUNT};
use crate::state::VerificationKey;

pub struct Trapdoor {
    alpha: Fr,
    beta: Fr,
    gamma: Fr,
    delta: Fr,
    ic: Vec<Fr>,
}

impl Trapdoor {
    pub fn new(seed: u64) -> Self {
        let scalar = |k: u64| Fr::from(seed.wrapping_mul(1_000_003).wrapping_add(k));
        Self {
            alpha: scalar(11),
            beta: scalar(13),
            gamma: scalar(17),
            delta: scalar(19),
            ic: (0..=PUBLIC_INPUT_COUNT as u64).map(|i| scalar(23 + i)).collect(),
        }
    }

    pub fn verification_key(&self) -> VerificationKey {
        VerificationKey {
            alpha_g1: g1_mul(self.alpha),
            beta_g2: g2_mul(self.beta),
            gamma_g2: g2_mul(self.gamma),
            delta_g2: g2_mul(self.delta),
            ic: self.ic.iter().map(|s| g1_mul(*s)).collect(),
        }
    }

    /// Valid proof for `witness`; `nonce` varies A and B.
    pub fn prove(&self, witness: &PublicWitness, nonce: u64) -> Vec<u8> {
        let a = Fr::from(nonce.wrapping_add(101));
        let b = Fr::from(nonce.wrapping_add(103));

        let s = witness
            .field_elements()
            .iter()
            .zip(&self.ic[1..])
            .fold(self.ic[0], |acc, (x, ic)| {
                acc + Fr::from_be_bytes_mod_order(x) * ic
            });

        let delta_inv = self.delta.inverse().expect("delta is non-zero");
        let c = (a * b - self.alpha * self.beta - s * self.gamma) * delta_inv;

        Groth16Proof {
            a: g1_mul(a),
            b: g2_mul(b),
            c: g1_mul(c),
        }
        .to_bytes()
        .to_vec()
    }
}

fn fq_bytes(f: &Fq) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&f.into_bigint().to_bytes_be());
    out
}

pub fn g1_bytes(p: &G1Affine) -> [u8; 64] {
    let mut out = [0u8; 64];
    out[..32].copy_from_slice(&fq_bytes(&p.x));
    out[32..].copy_from_slice(&fq_bytes(&p.y));
    out
}

pub fn g2_bytes(p: &G2Affine) -> [u8; 128] {
    let mut out = [0u8; 128];
    out[..32].copy_from_slice(&fq_bytes(&p.x.c1));
    out[32..64].copy_from_slice(&fq_bytes(&p.x.c0));
    out[64..96].copy_from_slice(&fq_bytes(&p.y.c1));
    out[96..].copy_from_slice(&fq_bytes(&p.y.c0));
    out
}

fn g1_mul(s: Fr) -> [u8; 64] {
    g1_bytes(&(G1Affine::generator() * s).into_affine())
}

fn g2_mul(s: Fr) -> [u8; 128] {
    g2_bytes(&(G2Affine::generator() * s).into_affine())
}
