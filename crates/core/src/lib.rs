// Copyright 2025 Irreducible Inc.
//! Core datatypes shared by the Trellis builder and a prover backend.
//!
//! Most importantly it hosts the gate ISA ([`GateKind`]) and the sink trait
//! ([`GateVector`]) through which the finalized gate table is emitted.

#![warn(missing_docs)]

pub mod error;
pub mod field;
pub mod gate;
pub mod sink;
pub mod verify;

pub use error::{CheckError, ConstraintError, WitnessError};
pub use field::FieldBytes;
pub use gate::{COLUMNS, GateKind};
pub use sink::{GateTable, GateVector, RawGate};
