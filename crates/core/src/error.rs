// Copyright 2025 Irreducible Inc.
//! Hosts error definitions for the core crate.

/// Error raised while accepting a constraint.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConstraintError {
	/// The gate table was already emitted; the system accepts no further
	/// constraints.
	#[error("constraint added to a finalized system")]
	FinalizedSystem,
	/// A constraint whose operands all reduced to constants states a false
	/// equation. Reported eagerly: the circuit cannot be completed.
	#[error("{constraint} constraint over constant operands is unsatisfiable")]
	AssertFailure {
		/// Tag of the offending constraint kind.
		constraint: &'static str,
	},
	/// A generic constraint carries a nonzero multiplicative selector while
	/// both multiplicand operands reduced to constants, leaving the
	/// selector no wire to read.
	#[error("nonzero multiplicative selector requires a non-constant operand")]
	NonConstantRequired,
}

/// Error raised while computing a witness.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WitnessError {
	/// An internal variable was placed on a row but never given a defining
	/// formula. Indicates a bug in the caller or the builder.
	#[error("internal variable {0} has no defining formula")]
	UnknownInternalVar(u64),
}

/// Gate table checker error.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckError {
	#[error("generic gate at row {row} is not satisfied")]
	UnsatisfiedGate { row: u64 },
	#[error("row {row} column {col} disagrees with its previous occurrence")]
	CopyMismatch { row: u64, col: u8 },
}
