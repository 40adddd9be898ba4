// Copyright 2025 Irreducible Inc.
//! Equality of two linear combinations.

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
) -> Result<(), ConstraintError> {
	let (s1, x1) = sys.reduce_lincom(a)?;
	let (s2, x2) = sys.reduce_lincom(b)?;
	match (x1, x2) {
		// s1·x1 − s2·x2 = 0
		//
		// A pair with matching scales could skip the gate and merge the two
		// wires in the copy permutation instead; both cases emit the gate.
		(Reduced::Var(x1), Reduced::Var(x2)) => sys.add_generic_gate(
			Some(x1),
			Some(x2),
			None,
			[s1, -s2, F::zero(), F::zero(), F::zero()],
		),
		// s1·x1 − s2 = 0
		(Reduced::Var(x1), Reduced::Constant) => sys.add_generic_gate(
			Some(x1),
			None,
			None,
			[s1, F::zero(), F::zero(), F::zero(), -s2],
		),
		// s2·x2 − s1 = 0
		(Reduced::Constant, Reduced::Var(x2)) => sys.add_generic_gate(
			None,
			Some(x2),
			None,
			[F::zero(), s2, F::zero(), F::zero(), -s1],
		),
		(Reduced::Constant, Reduced::Constant) => {
			if s1 == s2 {
				Ok(())
			} else {
				Err(ConstraintError::AssertFailure { constraint: "equal" })
			}
		}
	}
}
