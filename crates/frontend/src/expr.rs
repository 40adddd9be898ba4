// Copyright 2025 Irreducible Inc.
//! Symbolic expressions over external circuit variables.

use ark_ff::{One, PrimeField, Zero};
use itertools::Itertools;

/// A linear symbolic expression over external variables.
///
/// External variables are indexed from 1; index 0 is reserved for the
/// constant term in canonical form. Expressions are trees built from
/// constants, variables, sums and scalar multiples; the builder flattens
/// them on acceptance, so sharing subtrees carries no cost beyond the clone.
#[derive(Clone, Debug)]
pub enum Expr<F> {
	/// A field constant.
	Constant(F),
	/// An external variable, indexed from 1.
	Var(u32),
	/// Sum of two expressions.
	Add(Box<Expr<F>>, Box<Expr<F>>),
	/// An expression multiplied by a scalar.
	Scale(F, Box<Expr<F>>),
}

impl<F: PrimeField> Expr<F> {
	/// A constant expression.
	pub fn constant(c: F) -> Self {
		Expr::Constant(c)
	}

	/// The external variable with the given 1-based index.
	///
	/// # Panics
	///
	/// Panics if `index` is 0.
	pub fn var(index: u32) -> Self {
		assert!(index > 0, "external variables are indexed from 1");
		Expr::Var(index)
	}

	/// Multiplies the expression by a scalar.
	pub fn scale(self, s: F) -> Self {
		Expr::Scale(s, Box::new(self))
	}

	/// Flattens the tree into a constant and a list of
	/// `(coefficient, variable)` terms mathematically equal to the
	/// expression.
	///
	/// The constant is `None` when it accumulates to zero. Terms come out
	/// in tree order and may repeat variables.
	pub fn to_constant_and_terms(&self) -> (Option<F>, Vec<(F, u32)>) {
		let mut constant = F::zero();
		let mut terms = Vec::new();
		self.walk(F::one(), &mut constant, &mut terms);
		((!constant.is_zero()).then_some(constant), terms)
	}

	fn walk(&self, scale: F, constant: &mut F, terms: &mut Vec<(F, u32)>) {
		match self {
			Expr::Constant(c) => *constant += scale * c,
			Expr::Var(v) => terms.push((scale, *v)),
			Expr::Add(a, b) => {
				a.walk(scale, constant, terms);
				b.walk(scale, constant, terms);
			}
			Expr::Scale(s, inner) => inner.walk(scale * s, constant, terms),
		}
	}

	/// Canonical term list used by the circuit digest.
	///
	/// Terms are sorted by variable id, runs with equal id are fused
	/// left-to-right by summing, and the constant (when present) is
	/// prepended as a term with the reserved id 0. Zero coefficients
	/// survive fusion: the digest is insensitive to reordering, not to
	/// cancellation. The second component records whether a constant was
	/// present.
	pub fn canonicalize(&self) -> (Vec<(F, u32)>, bool) {
		let (constant, mut terms) = self.to_constant_and_terms();
		terms.sort_by_key(|&(_, i)| i);
		let had_constant = constant.is_some();
		if let Some(c) = constant {
			terms.insert(0, (c, 0));
		}
		let fused = terms
			.into_iter()
			.coalesce(|(a, i), (b, j)| {
				if i == j {
					Ok((a + b, i))
				} else {
					Err(((a, i), (b, j)))
				}
			})
			.collect();
		(fused, had_constant)
	}
}

impl<F: PrimeField> std::ops::Add for Expr<F> {
	type Output = Expr<F>;

	fn add(self, rhs: Expr<F>) -> Expr<F> {
		Expr::Add(Box::new(self), Box::new(rhs))
	}
}

impl<F: PrimeField> std::ops::Neg for Expr<F> {
	type Output = Expr<F>;

	fn neg(self) -> Expr<F> {
		self.scale(-F::one())
	}
}

impl<F: PrimeField> std::ops::Sub for Expr<F> {
	type Output = Expr<F>;

	fn sub(self, rhs: Expr<F>) -> Expr<F> {
		self + (-rhs)
	}
}

#[cfg(test)]
mod tests {
	use ark_bls12_381::Fr;
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn test_flatten_distributes_scale() {
		let e = (Expr::var(2).scale(Fr::from(3u64)) + Expr::constant(Fr::from(5u64)))
			.scale(Fr::from(2u64));
		let (constant, terms) = e.to_constant_and_terms();
		assert_eq!(constant, Some(Fr::from(10u64)));
		assert_eq!(terms, vec![(Fr::from(6u64), 2)]);
	}

	#[test]
	fn test_zero_constant_is_absent() {
		let e = Expr::<Fr>::var(1) + Expr::constant(Fr::zero());
		let (constant, _) = e.to_constant_and_terms();
		assert_eq!(constant, None);
	}

	#[test]
	fn test_canonicalize_merges_duplicates() {
		let e = Expr::var(4) + Expr::var(4).scale(Fr::from(2u64)) + Expr::var(1);
		let (terms, had_constant) = e.canonicalize();
		assert!(!had_constant);
		assert_eq!(terms, vec![(Fr::one(), 1), (Fr::from(3u64), 4)]);
	}

	#[test]
	fn test_canonicalize_keeps_cancelled_terms() {
		let e = Expr::<Fr>::var(7) - Expr::var(7);
		let (terms, _) = e.canonicalize();
		assert_eq!(terms, vec![(Fr::zero(), 7)]);
	}

	#[test]
	fn test_constant_leads_with_reserved_id() {
		let e = Expr::var(3) + Expr::constant(Fr::from(9u64));
		let (terms, had_constant) = e.canonicalize();
		assert!(had_constant);
		assert_eq!(terms[0], (Fr::from(9u64), 0));
		assert_eq!(terms[1].1, 3);
	}

	fn sum(constant: u64, terms: &[(u64, u32)]) -> Expr<Fr> {
		let mut e = Expr::constant(Fr::from(constant));
		for &(c, i) in terms {
			e = e + Expr::var(i).scale(Fr::from(c));
		}
		e
	}

	proptest! {
		#[test]
		fn canonicalize_is_order_insensitive(
			constant in 0u64..100,
			terms in proptest::collection::vec((0u64..1000, 1u32..8), 0..8),
		) {
			let reversed: Vec<_> = terms.iter().rev().copied().collect();
			prop_assert_eq!(
				sum(constant, &terms).canonicalize(),
				sum(constant, &reversed).canonicalize()
			);
		}
	}
}
