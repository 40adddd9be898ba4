// Copyright 2025 Irreducible Inc.

//! Constraint construction frontend for the Trellis gate table.
//!
//! This crate provides the [`CircuitBuilder`] API for lowering algebraic
//! constraints over a prime field into a PLONK gate table with three wire
//! columns. You describe statements as [`Constraint`]s over symbolic
//! [`Expr`]essions of external variables; the builder compiles each one into
//! gate rows, spilling wide linear combinations through fresh internal
//! variables, and threads every wire placement into the copy-permutation
//! back-pointers.
//!
//! # Usage Flow
//!
//! Create a [`CircuitBuilder`] and feed it constraints with
//! `add_constraint()`. Declare the input split with
//! `set_public_input_size()` and `set_auxiliary_input_size()`. Call
//! `finalize()` once to stream the gate table — public-input rows first —
//! into any [`GateVector`] sink, such as the in-memory
//! [`GateTable`](trellis_core::GateTable).
//!
//! To produce a witness, call `compute_witness()` with a function resolving
//! each external variable; internal variables introduced during lowering are
//! evaluated on demand from their recorded formulas.
//!
//! `digest()` returns a fingerprint of the ordered constraint sequence at
//! any point; two builders fed the same constraints report the same digest.
//!
//! [`GateVector`]: trellis_core::GateVector

#![warn(missing_docs)]

mod compiler;
pub mod expr;

pub use compiler::{
	CircuitBuilder,
	constraint::{Constraint, EndoscaleRound, PoseidonParams, ScaleRound},
};
pub use expr::Expr;
