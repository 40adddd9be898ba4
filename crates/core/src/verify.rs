// Copyright 2025 Irreducible Inc.
//! Post-hoc checking of an emitted gate table against a witness.

use ark_ff::{PrimeField, Zero};

use crate::{
	error::CheckError,
	gate::GateKind,
	sink::{GateTable, RawGate},
};

/// Checks a gate table against a dense witness.
///
/// Two families of checks run over every row:
///
/// - copy consistency: each wire's value equals the value at its
///   back-pointer target;
/// - the selector equation `sl·L + sr·R + so·O + sm·L·R + sc = 0` on
///   [`GateKind::Generic`] rows.
///
/// The first `public_input_size` rows are exempt from the selector
/// equation: a public-input row reads `L = input`, which the proof system
/// balances against the public input polynomial rather than the row itself.
///
/// Poseidon and elliptic-curve row equations belong to the prover backend
/// and are not checked here.
pub fn check_gate_table<F: PrimeField>(
	table: &GateTable<F>,
	public_input_size: u64,
	witness: &[[F; 3]],
) -> Result<(), CheckError> {
	for gate in table.gates() {
		check_copy(gate, witness)?;
		if gate.kind == GateKind::Generic && gate.row >= public_input_size {
			check_generic(gate, witness)?;
		}
	}
	Ok(())
}

fn value<F: PrimeField>(witness: &[[F; 3]], row: u64, col: u8) -> Option<F> {
	witness
		.get(row as usize)
		.and_then(|r| r.get(col as usize))
		.copied()
}

fn check_copy<F: PrimeField>(gate: &RawGate<F>, witness: &[[F; 3]]) -> Result<(), CheckError> {
	for (col, (prow, pcol)) in [gate.l, gate.r, gate.o].into_iter().enumerate() {
		let col = col as u8;
		// An out-of-range back-pointer marks an unused slot (the endomul
		// bit row); there is no value to compare.
		let Some(prev) = value(witness, prow, pcol) else {
			continue;
		};
		match value(witness, gate.row, col) {
			Some(here) if here == prev => {}
			_ => return Err(CheckError::CopyMismatch { row: gate.row, col }),
		}
	}
	Ok(())
}

fn check_generic<F: PrimeField>(gate: &RawGate<F>, witness: &[[F; 3]]) -> Result<(), CheckError> {
	let slots: [Option<F>; 3] = [0u8, 1, 2].map(|col| value(witness, gate.row, col));
	let [Some(l), Some(r), Some(o)] = slots else {
		return Err(CheckError::UnsatisfiedGate { row: gate.row });
	};
	let c = &gate.coeffs;
	let sum = c[0] * l + c[1] * r + c[2] * o + c[3] * l * r + c[4];
	if sum.is_zero() {
		Ok(())
	} else {
		Err(CheckError::UnsatisfiedGate { row: gate.row })
	}
}
