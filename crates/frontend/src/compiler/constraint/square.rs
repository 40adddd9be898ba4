// Copyright 2025 Irreducible Inc.
//! Squaring of a linear combination.

use ark_ff::{Field, Zero};
use trellis_core::{ConstraintError, FieldBytes};

use crate::{
	compiler::{CircuitBuilder, Reduced},
	expr::Expr,
};

pub(crate) fn lower<F: FieldBytes>(
	sys: &mut CircuitBuilder<F>,
	arg: &Expr<F>,
	out: &Expr<F>,
) -> Result<(), ConstraintError> {
	let (sl, xl) = sys.reduce_lincom(arg)?;
	let (so, xo) = sys.reduce_lincom(out)?;
	match (xl, xo) {
		// (sl·xl)² = so·xo, so sl²·xl·xl − so·xo = 0
		(Reduced::Var(xl), Reduced::Var(xo)) => sys.add_generic_gate(
			Some(xl),
			Some(xl),
			Some(xo),
			[F::zero(), F::zero(), -so, sl.square(), F::zero()],
		),
		// sl²·xl·xl − so = 0
		(Reduced::Var(xl), Reduced::Constant) => sys.add_generic_gate(
			Some(xl),
			Some(xl),
			None,
			[F::zero(), F::zero(), F::zero(), sl.square(), -so],
		),
		// so·xo − sl² = 0
		(Reduced::Constant, Reduced::Var(xo)) => sys.add_generic_gate(
			None,
			None,
			Some(xo),
			[F::zero(), F::zero(), so, F::zero(), -sl.square()],
		),
		(Reduced::Constant, Reduced::Constant) => {
			if sl.square() == so {
				Ok(())
			} else {
				Err(ConstraintError::AssertFailure {
					constraint: "square",
				})
			}
		}
	}
}
