// Copyright 2025 Irreducible Inc.
//! Poseidon permutation rows.

use ark_ff::Zero;
use trellis_core::{ConstraintError, FieldBytes, GateKind};

use crate::{compiler::CircuitBuilder, expr::Expr};

/// Poseidon round constants.
///
/// Row `i` holds the additive constants of round `i`; a trace of `R`
/// transitions needs `R + 1` rows, the first being absorbed before the
/// cascade starts.
#[derive(Clone, Debug)]
pub struct PoseidonParams<F> {
	/// One triple of additive constants per round.
	pub round_constants: Vec<[F; 3]>,
}

pub(crate) fn lower<F: FieldBytes>(
	sys: &mut CircuitBuilder<F>,
	state: &[[Expr<F>; 3]],
) -> Result<(), ConstraintError> {
	let mut reduced = Vec::with_capacity(state.len());
	for row in state {
		reduced.push([
			Some(sys.reduce_to_v(&row[0])?),
			Some(sys.reduce_to_v(&row[1])?),
			Some(sys.reduce_to_v(&row[2])?),
		]);
	}
	let rounds = reduced.len().saturating_sub(1);
	for (i, vars) in reduced.into_iter().enumerate() {
		if i < rounds {
			// The row holds state[i]; its selectors are the constants of
			// the round producing state[i + 1].
			let rc = sys
				.poseidon_params
				.as_ref()
				.expect("poseidon constraints require round constants")
				.round_constants[i + 1];
			sys.add_gate_row(
				GateKind::Poseidon,
				vars,
				vec![rc[0], rc[1], rc[2], F::zero(), F::zero()],
			)?;
		} else {
			sys.add_gate_row(GateKind::Zero, vars, vec![F::zero(); 5])?;
		}
	}
	Ok(())
}
