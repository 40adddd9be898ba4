// Copyright 2025 Irreducible Inc.
//! Affine elliptic curve addition rows.

use trellis_core::{ConstraintError, FieldBytes, GateKind};

use crate::{compiler::CircuitBuilder, expr::Expr};

pub(crate) fn lower<F: FieldBytes>(
	sys: &mut CircuitBuilder<F>,
	p1: &(Expr<F>, Expr<F>),
	p2: &(Expr<F>, Expr<F>),
	p3: &(Expr<F>, Expr<F>),
) -> Result<(), ConstraintError> {
	let (x1, y1) = (sys.reduce_to_v(&p1.0)?, sys.reduce_to_v(&p1.1)?);
	let (x2, y2) = (sys.reduce_to_v(&p2.0)?, sys.reduce_to_v(&p2.1)?);
	let (x3, y3) = (sys.reduce_to_v(&p3.0)?, sys.reduce_to_v(&p3.1)?);
	// The y row precedes the x row.
	sys.add_gate_row(GateKind::Add1, [Some(y1), Some(y2), Some(y3)], vec![])?;
	sys.add_gate_row(GateKind::Add2, [Some(x1), Some(x2), Some(x3)], vec![])
}
