// Copyright 2025 Irreducible Inc.
//! Variable-base scalar multiplication rows.

use trellis_core::{ConstraintError, FieldBytes, GateKind};

use crate::{
	compiler::{CircuitBuilder, constraint::ScaleRound},
	expr::Expr,
};

pub(crate) fn lower<F: FieldBytes>(
	sys: &mut CircuitBuilder<F>,
	state: &[ScaleRound<Expr<F>>],
) -> Result<(), ConstraintError> {
	for round in state {
		let round = round.try_map(|x| sys.reduce_to_v(x))?;
		sys.add_gate_row(
			GateKind::Vbmul1,
			[Some(round.xt), Some(round.b), Some(round.yt)],
			vec![],
		)?;
		sys.add_gate_row(
			GateKind::Vbmul2,
			[Some(round.xp), Some(round.l1), Some(round.yp)],
			vec![],
		)?;
		sys.add_gate_row(
			GateKind::Vbmul3,
			[Some(round.xs), Some(round.xt), Some(round.ys)],
			vec![],
		)?;
	}
	Ok(())
}
