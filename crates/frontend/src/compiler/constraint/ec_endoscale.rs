// Copyright 2025 Irreducible Inc.
//! Endomorphism-accelerated scalar multiplication rows.

use trellis_core::{ConstraintError, FieldBytes, GateKind};

use crate::{
	compiler::{CircuitBuilder, Position, Row, constraint::EndoscaleRound},
	expr::Expr,
};

pub(crate) fn lower<F: FieldBytes>(
	sys: &mut CircuitBuilder<F>,
	state: &[EndoscaleRound<Expr<F>>],
) -> Result<(), ConstraintError> {
	for round in state {
		let round = round.try_map(|x| sys.reduce_to_v(x))?;
		// The bit row occupies two columns. Its third slot stays empty and
		// its back-pointer self-loops at the row's own column 3, one past
		// the wire columns; witness generation leaves the slot zero and
		// downstream must not read it.
		let row = Row::AfterPublicInput(sys.next_row);
		let lp = sys.wire(round.xt, row, 0);
		let rp = sys.wire(round.b2i1, row, 1);
		let op = Position { row, col: 3 };
		sys.add_row(
			[Some(round.xt), Some(round.b2i1), None],
			GateKind::Endomul1,
			lp,
			rp,
			op,
			vec![],
		)?;
		sys.add_gate_row(
			GateKind::Endomul2,
			[Some(round.b2i), Some(round.xq), Some(round.yt)],
			vec![],
		)?;
		sys.add_gate_row(
			GateKind::Endomul3,
			[Some(round.xp), Some(round.l1), Some(round.yp)],
			vec![],
		)?;
		sys.add_gate_row(
			GateKind::Endomul4,
			[Some(round.xs), Some(round.xq), Some(round.ys)],
			vec![],
		)?;
	}
	Ok(())
}
