// Copyright 2025 Irreducible Inc.
//! The gate ISA of the table.

/// Number of wire columns per gate row.
pub const COLUMNS: usize = 3;

/// The kind of a gate row.
///
/// The numeric codes are part of the wire format consumed by the prover
/// backend and must not be renumbered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GateKind {
	/// A passive row with zero selectors; closes a Poseidon cascade.
	Zero = 0,
	/// The generic arithmetic row: `sl·L + sr·R + so·O + sm·L·R + sc = 0`.
	Generic = 1,
	/// One full round of the Poseidon permutation. The row holds the
	/// current sponge state; the next row holds its image.
	Poseidon = 2,
	/// Elliptic curve addition, y-coordinate row `(y1, y2, y3)`.
	Add1 = 3,
	/// Elliptic curve addition, x-coordinate row `(x1, x2, x3)`.
	Add2 = 4,
	/// Variable-base scalar multiplication, accumulator row `(xt, b, yt)`.
	Vbmul1 = 5,
	/// Variable-base scalar multiplication, slope row `(xp, l1, yp)`.
	Vbmul2 = 6,
	/// Variable-base scalar multiplication, result row `(xs, xt, ys)`.
	Vbmul3 = 7,
	/// Endomorphism scalar multiplication, bit row `(xt, b2i1, ·)`. The
	/// third column is unused.
	Endomul1 = 8,
	/// Endomorphism scalar multiplication, second bit row `(b2i, xq, yt)`.
	Endomul2 = 9,
	/// Endomorphism scalar multiplication, slope row `(xp, l1, yp)`.
	Endomul3 = 10,
	/// Endomorphism scalar multiplication, result row `(xs, xq, ys)`.
	Endomul4 = 11,
}

impl GateKind {
	/// The wire-format code of this gate kind.
	pub fn code(self) -> u8 {
		self as u8
	}

	/// Number of selector coefficients a row of this kind carries: five for
	/// the generic and Poseidon-family rows, none for the curve rows.
	pub fn coeff_len(self) -> usize {
		match self {
			GateKind::Zero | GateKind::Generic | GateKind::Poseidon => 5,
			_ => 0,
		}
	}
}
