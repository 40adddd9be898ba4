// Copyright 2025 Irreducible Inc.
//! Rank-1 products: `a · b = c` over three linear combinations.

use ark_ff::Zero;
use trellis_core::{ConstraintError, FieldBytes};

use crate::{
	compiler::{CircuitBuilder, Reduced},
	expr::Expr,
};

pub(crate) fn lower<F: FieldBytes>(
	sys: &mut CircuitBuilder<F>,
	a: &Expr<F>,
	b: &Expr<F>,
	c: &Expr<F>,
) -> Result<(), ConstraintError> {
	let (s1, x1) = sys.reduce_lincom(a)?;
	let (s2, x2) = sys.reduce_lincom(b)?;
	let (s3, x3) = sys.reduce_lincom(c)?;
	use Reduced::{Constant, Var};
	match (x1, x2, x3) {
		// s1·x1 · s2·x2 = s3·x3, so s3·x3 − s1·s2·x1·x2 = 0
		(Var(x1), Var(x2), Var(x3)) => sys.add_generic_gate(
			Some(x1),
			Some(x2),
			Some(x3),
			[F::zero(), F::zero(), s3, -(s1 * s2), F::zero()],
		),
		// s1·s2·x1·x2 − s3 = 0
		(Var(x1), Var(x2), Constant) => sys.add_generic_gate(
			Some(x1),
			Some(x2),
			None,
			[F::zero(), F::zero(), F::zero(), s1 * s2, -s3],
		),
		// s1·s2·x1 − s3·x3 = 0
		(Var(x1), Constant, Var(x3)) => sys.add_generic_gate(
			Some(x1),
			None,
			Some(x3),
			[s1 * s2, F::zero(), -s3, F::zero(), F::zero()],
		),
		// s1·s2·x2 − s3·x3 = 0
		(Constant, Var(x2), Var(x3)) => sys.add_generic_gate(
			None,
			Some(x2),
			Some(x3),
			[F::zero(), s1 * s2, -s3, F::zero(), F::zero()],
		),
		// s1·s2·x1 − s3 = 0
		(Var(x1), Constant, Constant) => sys.add_generic_gate(
			Some(x1),
			None,
			None,
			[s1 * s2, F::zero(), F::zero(), F::zero(), -s3],
		),
		// s1·s2·x2 − s3 = 0
		(Constant, Var(x2), Constant) => sys.add_generic_gate(
			None,
			Some(x2),
			None,
			[F::zero(), s1 * s2, F::zero(), F::zero(), -s3],
		),
		// s3·x3 − s1·s2 = 0
		(Constant, Constant, Var(x3)) => sys.add_generic_gate(
			None,
			None,
			Some(x3),
			[F::zero(), F::zero(), s3, F::zero(), -(s1 * s2)],
		),
		(Constant, Constant, Constant) => {
			if s1 * s2 == s3 {
				Ok(())
			} else {
				Err(ConstraintError::AssertFailure { constraint: "r1cs" })
			}
		}
	}
}
