// Copyright 2025 Irreducible Inc.
//! Witness generation from the recorded row templates.

use ark_ff::Zero;
use trellis_core::{COLUMNS, FieldBytes, WitnessError};

use crate::compiler::{CircuitBuilder, Var};

impl<F: FieldBytes> CircuitBuilder<F> {
	/// Computes the dense row-by-column witness assignment.
	///
	/// `external` resolves each external variable by its 1-based index. The
	/// first `n` rows form the public input block with the input value at
	/// column 0 and zeros elsewhere; the remaining rows follow the recorded
	/// templates in insertion order, with internal variables evaluated on
	/// demand from their formulas. Empty slots stay zero.
	///
	/// Witness generation does not finalize the system and may run before
	/// or after finalization.
	///
	/// # Panics
	///
	/// Panics if the public input size was never set.
	pub fn compute_witness(
		&self,
		external: impl Fn(u32) -> F,
	) -> Result<Vec<[F; COLUMNS]>, WitnessError> {
		let n = self
			.public_input_size
			.expect("public input size must be set before computing a witness")
			as usize;
		let mut res = vec![[F::zero(); COLUMNS]; n + self.rows.len()];
		for (i, row) in res[..n].iter_mut().enumerate() {
			row[0] = external(i as u32 + 1);
		}
		let mut memo: Vec<Option<F>> = vec![None; self.internal_vars.len()];
		for (j, template) in self.rows.iter().enumerate() {
			for (k, slot) in template.iter().enumerate() {
				match slot {
					None => {}
					Some(Var::External(e)) => res[n + j][k] = external(*e),
					Some(Var::Internal(id)) => {
						res[n + j][k] = self.internal_value(&external, &mut memo, *id)?;
					}
				}
			}
		}
		Ok(res)
	}

	/// Evaluates an internal variable's formula, memoizing the result.
	///
	/// The formula graph is a DAG over earlier variables, so the recursion
	/// bottoms out on memoized or external inputs after at most one level
	/// per unevaluated ancestor.
	fn internal_value(
		&self,
		external: &impl Fn(u32) -> F,
		memo: &mut Vec<Option<F>>,
		id: u64,
	) -> Result<F, WitnessError> {
		if let Some(Some(value)) = memo.get(id as usize) {
			return Ok(*value);
		}
		let var = self
			.internal_vars
			.get(id as usize)
			.ok_or(WitnessError::UnknownInternalVar(id))?;
		let mut acc = var.constant.unwrap_or_else(F::zero);
		for (coeff, v) in &var.terms {
			let value = match v {
				Var::External(e) => external(*e),
				Var::Internal(inner) => self.internal_value(external, memo, *inner)?,
			};
			acc += *coeff * value;
		}
		memo[id as usize] = Some(acc);
		Ok(acc)
	}
}
