// Copyright 2025 Irreducible Inc.
//! Byte-level adapter over a prime field.

use ark_ff::{BigInteger, PrimeField};

/// Fixed-width little-endian encoding of prime-field elements.
///
/// The encoding exists for hashing only: every element is rendered as its
/// canonical representative in exactly [`encoded_len`] bytes, least
/// significant byte first, identical across runs and platforms. Arithmetic
/// comes from [`PrimeField`] itself.
///
/// [`encoded_len`]: FieldBytes::encoded_len
pub trait FieldBytes: PrimeField {
	/// Number of bytes in the canonical encoding: one per started octet of
	/// the modulus.
	fn encoded_len() -> usize {
		(Self::MODULUS_BIT_SIZE as usize).div_ceil(8)
	}

	/// Appends the canonical little-endian encoding of `self` to `out`.
	///
	/// The representative is below the modulus, so truncating the limb
	/// encoding to [`encoded_len`] bytes never discards a set bit.
	///
	/// [`encoded_len`]: FieldBytes::encoded_len
	fn append_bytes_le(&self, out: &mut Vec<u8>) {
		let bytes = self.into_bigint().to_bytes_le();
		out.extend_from_slice(&bytes[..Self::encoded_len()]);
	}
}

impl<F: PrimeField> FieldBytes for F {}

#[cfg(test)]
mod tests {
	use ark_bls12_381::Fr;
	use ark_ff::One;

	use super::*;

	#[test]
	fn test_encoded_len_covers_modulus() {
		assert_eq!(Fr::encoded_len(), 32);
	}

	#[test]
	fn test_one_encodes_little_endian() {
		let mut out = Vec::new();
		Fr::one().append_bytes_le(&mut out);
		assert_eq!(out.len(), Fr::encoded_len());
		assert_eq!(out[0], 1);
		assert!(out[1..].iter().all(|&b| b == 0));
	}

	#[test]
	fn test_negative_one_is_full_width() {
		let mut out = Vec::new();
		(-Fr::one()).append_bytes_le(&mut out);
		assert_eq!(out.len(), Fr::encoded_len());
		// r - 1 is odd and fills the upper bytes.
		assert_ne!(out[31], 0);
	}

	#[test]
	fn test_encoding_distinguishes_elements() {
		let mut a = Vec::new();
		let mut b = Vec::new();
		Fr::one().append_bytes_le(&mut a);
		Fr::from(2u64).append_bytes_le(&mut b);
		assert_ne!(a, b);
	}
}
