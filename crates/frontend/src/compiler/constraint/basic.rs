// Copyright 2025 Irreducible Inc.
//! The raw generic gate over three reduced operands.

use ark_ff::Zero;
use trellis_core::{ConstraintError, FieldBytes};

use crate::{
	compiler::{CircuitBuilder, Reduced, Var},
	expr::Expr,
};

pub(crate) fn lower<F: FieldBytes>(
	sys: &mut CircuitBuilder<F>,
	l: &(F, Expr<F>),
	r: &(F, Expr<F>),
	o: &(F, Expr<F>),
	m: F,
	c: F,
) -> Result<(), ConstraintError> {
	let mut c = c;
	let (l_res, l_term) = reduce_operand(sys, l, &mut c)?;
	let (r_res, r_term) = reduce_operand(sys, r, &mut c)?;
	let (_, o_term) = reduce_operand(sys, o, &mut c)?;

	let (mut sl, lv) = split(l_term);
	let (mut sr, rv) = split(r_term);
	let (so, ov) = split(o_term);

	// The product selector reads the left and right wires. With both
	// operands still variables it survives, rescaled by their residual
	// reduction scales. With exactly one variable left the product is
	// linear in it and folds into that operand's selector. Two constants
	// leave the selector nothing to read.
	let m = match (l_term, r_term) {
		(Some(_), Some(_)) => l_res * r_res * m,
		(Some(_), None) => {
			sl += m * l_res * r_res;
			F::zero()
		}
		(None, Some(_)) => {
			sr += m * l_res * r_res;
			F::zero()
		}
		(None, None) if m.is_zero() => F::zero(),
		(None, None) => return Err(ConstraintError::NonConstantRequired),
	};

	sys.add_generic_gate(lv, rv, ov, [sl, sr, so, m, c])
}

/// Reduces one `selector · expression` operand. An operand that reduces to
/// a constant folds its contribution into the gate constant and vacates its
/// wire; otherwise the selector is rescaled by the residual scale.
fn reduce_operand<F: FieldBytes>(
	sys: &mut CircuitBuilder<F>,
	(outer, x): &(F, Expr<F>),
	c: &mut F,
) -> Result<(F, Option<(F, Var)>), ConstraintError> {
	let (residual, kind) = sys.reduce_lincom(x)?;
	Ok(match kind {
		Reduced::Var(v) => (residual, Some((*outer * residual, v))),
		Reduced::Constant => {
			*c += *outer * residual;
			(residual, None)
		}
	})
}

fn split<F: FieldBytes>(term: Option<(F, Var)>) -> (F, Option<Var>) {
	match term {
		Some((s, v)) => (s, Some(v)),
		None => (F::zero(), None),
	}
}
