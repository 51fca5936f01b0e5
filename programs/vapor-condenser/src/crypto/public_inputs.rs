//! Public witness for the condense circuit
//!
//! The witness is the gnark binary encoding of the circuit's public inputs:
//!
//! ```text
//! [0..4]     nb_public  (u32 BE) = 4
//! [4..8]     nb_secret  (u32 BE) = 0
//! [8..12]    vec length (u32 BE) = 4
//! [12..44]   recipient lo
//! [44..76]   recipient hi
//! [76..108]  amount (u64 in the last 8 bytes)
//! [108..140] accumulator root
//! ```
//!
//! Every input must be a canonical BN254 scalar. Parsing only checks
//! structure; [`PublicWitness::recipient`] and [`PublicWitness::amount`]
//! decode the semantic values once the proof has been checked.

use anchor_lang::prelude::*;
use vapor_accumulator::crypto::poseidon::{pack_pubkey, u64_to_bytes32_be, unpack_pubkey};

use crate::error::CondenserError;

use super::curve_utils::{is_valid_scalar, ScalarField};

/// Number of public inputs the condense circuit exposes.
pub const PUBLIC_INPUT_COUNT: usize = 4;

/// gnark witness header: nb_public, nb_secret, vector length.
const HEADER_LEN: usize = 12;

/// Encoded witness length in bytes.
pub const WITNESS_DATA_LEN: usize = HEADER_LEN + 32 * PUBLIC_INPUT_COUNT;

const RECIPIENT_LO: usize = 0;
const RECIPIENT_HI: usize = 1;
const AMOUNT: usize = 2;
const ROOT: usize = 3;

/// Parsed public witness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicWitness {
    inputs: [ScalarField; PUBLIC_INPUT_COUNT],
}

impl PublicWitness {
    /// Build the witness a prover commits to for `(recipient, amount, root)`.
    pub fn new(recipient: &Pubkey, amount: u64, root: [u8; 32]) -> Self {
        let [lo, hi] = pack_pubkey(recipient);
        Self {
            inputs: [lo, hi, u64_to_bytes32_be(amount), root],
        }
    }

    /// Parse the gnark witness encoding.
    ///
    /// # Errors
    /// * `InvalidWitness` on wrong length, header, or non-canonical input
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        require!(
            data.len() == WITNESS_DATA_LEN,
            CondenserError::InvalidWitness
        );

        let expected = PUBLIC_INPUT_COUNT as u32;
        require!(
            read_u32_be(&data[0..4]) == expected
                && read_u32_be(&data[4..8]) == 0
                && read_u32_be(&data[8..12]) == expected,
            CondenserError::InvalidWitness
        );

        let mut inputs = [[0u8; 32]; PUBLIC_INPUT_COUNT];
        for (input, chunk) in inputs.iter_mut().zip(data[HEADER_LEN..].chunks_exact(32)) {
            input.copy_from_slice(chunk);
            require!(is_valid_scalar(input), CondenserError::InvalidWitness);
        }

        Ok(Self { inputs })
    }

    /// Serialize to the gnark witness encoding.
    pub fn to_bytes(&self) -> [u8; WITNESS_DATA_LEN] {
        let mut bytes = [0u8; WITNESS_DATA_LEN];
        let count = (PUBLIC_INPUT_COUNT as u32).to_be_bytes();
        bytes[0..4].copy_from_slice(&count);
        bytes[8..12].copy_from_slice(&count);
        for (chunk, input) in bytes[HEADER_LEN..].chunks_exact_mut(32).zip(&self.inputs) {
            chunk.copy_from_slice(input);
        }
        bytes
    }

    /// Public inputs in circuit order, as fed to vk_x.
    pub fn field_elements(&self) -> &[ScalarField; PUBLIC_INPUT_COUNT] {
        &self.inputs
    }

    /// Accumulator root the proof was generated against.
    pub fn root(&self) -> [u8; 32] {
        self.inputs[ROOT]
    }

    /// Decode the recipient from its packed field elements.
    ///
    /// # Errors
    /// * `InvalidWitness` if the packing is not canonical
    pub fn recipient(&self) -> Result<Pubkey> {
        unpack_pubkey(&self.inputs[RECIPIENT_LO], &self.inputs[RECIPIENT_HI])
            .ok_or_else(|| error!(CondenserError::InvalidWitness))
    }

    /// Decode the cumulative amount.
    ///
    /// # Errors
    /// * `InvalidWitness` if the value does not fit in a u64
    pub fn amount(&self) -> Result<u64> {
        let amount = &self.inputs[AMOUNT];
        require!(
            amount[..24].iter().all(|&b| b == 0),
            CondenserError::InvalidWitness
        );

        let mut be = [0u8; 8];
        be.copy_from_slice(&amount[24..]);
        Ok(u64::from_be_bytes(be))
    }
}

fn read_u32_be(bytes: &[u8]) -> u32 {
    let mut be = [0u8; 4];
    be.copy_from_slice(bytes);
    u32::from_be_bytes(be)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::curve_utils::BN254_SCALAR_MODULUS;

    fn sample() -> (Pubkey, PublicWitness) {
        let recipient = Pubkey::new_unique();
        (recipient, PublicWitness::new(&recipient, 1000, [0x11; 32]))
    }

    #[test]
    fn test_layout() {
        let (_, witness) = sample();
        let bytes = witness.to_bytes();

        assert_eq!(bytes.len(), 140);
        assert_eq!(&bytes[0..12], &[0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 4]);
        assert_eq!(&bytes[100..108], &1000u64.to_be_bytes());
        assert_eq!(&bytes[108..140], &[0x11; 32]);
    }

    #[test]
    fn test_parse_decodes_fields() {
        let (recipient, witness) = sample();
        let parsed = PublicWitness::from_bytes(&witness.to_bytes()).unwrap();

        assert_eq!(parsed, witness);
        assert_eq!(parsed.recipient().unwrap(), recipient);
        assert_eq!(parsed.amount().unwrap(), 1000);
        assert_eq!(parsed.root(), [0x11; 32]);
    }

    #[test]
    fn test_wrong_length_rejected() {
        let (_, witness) = sample();
        let bytes = witness.to_bytes();
        assert!(PublicWitness::from_bytes(&bytes[..139]).is_err());

        let mut long = bytes.to_vec();
        long.push(0);
        assert!(PublicWitness::from_bytes(&long).is_err());
    }

    #[test]
    fn test_wrong_header_rejected() {
        let (_, witness) = sample();
        for offset in [3usize, 7, 11] {
            let mut bytes = witness.to_bytes();
            bytes[offset] ^= 1;
            assert!(PublicWitness::from_bytes(&bytes).is_err(), "header byte {}", offset);
        }
    }

    #[test]
    fn test_non_canonical_scalar_rejected() {
        let (_, witness) = sample();
        let mut bytes = witness.to_bytes();
        bytes[108..140].copy_from_slice(&BN254_SCALAR_MODULUS);
        assert!(PublicWitness::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_amount_overflow_rejected() {
        let (_, witness) = sample();
        let mut bytes = witness.to_bytes();
        bytes[76 + 23] = 1;
        let parsed = PublicWitness::from_bytes(&bytes).unwrap();
        assert!(parsed.amount().is_err());
    }

    #[test]
    fn test_non_canonical_recipient_rejected() {
        let (_, witness) = sample();
        let mut bytes = witness.to_bytes();
        bytes[44] = 1; // hi must be a single byte
        let parsed = PublicWitness::from_bytes(&bytes).unwrap();
        assert!(parsed.recipient().is_err());
    }
}
