// Copyright 2025 Irreducible Inc.
//! Booleanness of a linear combination.

use ark_ff::{Field, One, Zero};
use trellis_core::{ConstraintError, FieldBytes};

use crate::{
	compiler::{CircuitBuilder, Reduced},
	expr::Expr,
};

pub(crate) fn lower<F: FieldBytes>(
	sys: &mut CircuitBuilder<F>,
	v: &Expr<F>,
) -> Result<(), ConstraintError> {
	let (s, x) = sys.reduce_lincom(v)?;
	match x {
		// −x + x·x = 0, with x on both multiplicand wires.
		Reduced::Var(x) => sys.add_generic_gate(
			Some(x),
			Some(x),
			None,
			[-F::one(), F::zero(), F::zero(), F::one(), F::zero()],
		),
		Reduced::Constant => {
			if s == s.square() {
				Ok(())
			} else {
				Err(ConstraintError::AssertFailure {
					constraint: "boolean",
				})
			}
		}
	}
}
