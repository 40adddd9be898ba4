// Copyright 2025 Irreducible Inc.
//! The constraint language and its lowering into gate rows.

use trellis_core::{ConstraintError, FieldBytes};

use crate::{compiler::CircuitBuilder, expr::Expr};

mod basic;
mod boolean;
mod ec_add;
mod ec_endoscale;
mod ec_scale;
mod equal;
mod poseidon;
mod r1cs;
mod square;

pub use poseidon::PoseidonParams;

/// A high-level constraint accepted by
/// [`CircuitBuilder::add_constraint`](crate::CircuitBuilder::add_constraint).
#[derive(Clone, Debug)]
pub enum Constraint<F: FieldBytes> {
	/// `a = b`.
	Equal(Expr<F>, Expr<F>),
	/// The expression evaluates to 0 or 1.
	Boolean(Expr<F>),
	/// `arg² = out`.
	Square {
		/// The squared expression.
		arg: Expr<F>,
		/// The square.
		out: Expr<F>,
	},
	/// `a · b = c`.
	R1cs {
		/// Left factor.
		a: Expr<F>,
		/// Right factor.
		b: Expr<F>,
		/// Product.
		c: Expr<F>,
	},
	/// The raw generic gate equation
	/// `l.0·l.1 + r.0·r.1 + o.0·o.1 + m·l.1·r.1 + c = 0`.
	Generic {
		/// Left operand with its selector.
		l: (F, Expr<F>),
		/// Right operand with its selector.
		r: (F, Expr<F>),
		/// Output operand with its selector.
		o: (F, Expr<F>),
		/// Multiplicative selector over the left and right operands.
		m: F,
		/// Constant selector.
		c: F,
	},
	/// A Poseidon permutation trace: `state[i + 1]` is the image of
	/// `state[i]` under round `i + 1`.
	Poseidon {
		/// Sponge states: one per round, plus the final state.
		state: Vec<[Expr<F>; 3]>,
	},
	/// Elliptic curve point addition `p1 + p2 = p3` in affine coordinates.
	EcAdd {
		/// First summand `(x, y)`.
		p1: (Expr<F>, Expr<F>),
		/// Second summand `(x, y)`.
		p2: (Expr<F>, Expr<F>),
		/// Sum `(x, y)`.
		p3: (Expr<F>, Expr<F>),
	},
	/// Variable-base scalar multiplication trace.
	EcScale {
		/// One entry per processed scalar bit.
		state: Vec<ScaleRound<Expr<F>>>,
	},
	/// Endomorphism-accelerated scalar multiplication trace.
	EcEndoscale {
		/// One entry per processed bit pair.
		state: Vec<EndoscaleRound<Expr<F>>>,
	},
}

/// One step of a variable-base scalar multiplication.
#[derive(Clone, Debug)]
pub struct ScaleRound<T> {
	/// x-coordinate of the doubled point.
	pub xt: T,
	/// Scalar bit consumed by this step.
	pub b: T,
	/// y-coordinate of the doubled point.
	pub yt: T,
	/// x-coordinate of the accumulator.
	pub xp: T,
	/// Slope of the addition.
	pub l1: T,
	/// y-coordinate of the accumulator.
	pub yp: T,
	/// x-coordinate of the step result.
	pub xs: T,
	/// y-coordinate of the step result.
	pub ys: T,
}

impl<T> ScaleRound<T> {
	/// Maps every coordinate through `f`, short-circuiting on error.
	pub fn try_map<U, E>(
		&self,
		mut f: impl FnMut(&T) -> Result<U, E>,
	) -> Result<ScaleRound<U>, E> {
		Ok(ScaleRound {
			xt: f(&self.xt)?,
			b: f(&self.b)?,
			yt: f(&self.yt)?,
			xp: f(&self.xp)?,
			l1: f(&self.l1)?,
			yp: f(&self.yp)?,
			xs: f(&self.xs)?,
			ys: f(&self.ys)?,
		})
	}
}

/// One step of an endomorphism-accelerated scalar multiplication.
#[derive(Clone, Debug)]
pub struct EndoscaleRound<T> {
	/// High bit of the current pair.
	pub b2i1: T,
	/// x-coordinate of the endomorphism image.
	pub xt: T,
	/// Low bit of the current pair.
	pub b2i: T,
	/// x-coordinate of the base point.
	pub xq: T,
	/// y-coordinate of the endomorphism image.
	pub yt: T,
	/// x-coordinate of the accumulator.
	pub xp: T,
	/// Slope of the addition.
	pub l1: T,
	/// y-coordinate of the accumulator.
	pub yp: T,
	/// x-coordinate of the step result.
	pub xs: T,
	/// y-coordinate of the step result.
	pub ys: T,
}

impl<T> EndoscaleRound<T> {
	/// Maps every coordinate through `f`, short-circuiting on error.
	pub fn try_map<U, E>(
		&self,
		mut f: impl FnMut(&T) -> Result<U, E>,
	) -> Result<EndoscaleRound<U>, E> {
		Ok(EndoscaleRound {
			b2i1: f(&self.b2i1)?,
			xt: f(&self.xt)?,
			b2i: f(&self.b2i)?,
			xq: f(&self.xq)?,
			yt: f(&self.yt)?,
			xp: f(&self.xp)?,
			l1: f(&self.l1)?,
			yp: f(&self.yp)?,
			xs: f(&self.xs)?,
			ys: f(&self.ys)?,
		})
	}
}

impl<F: FieldBytes> Constraint<F> {
	/// Digest tag of this constraint kind.
	pub(crate) fn tag(&self) -> &'static str {
		match self {
			Constraint::Equal(..) => "equal",
			Constraint::Boolean(..) => "boolean",
			Constraint::Square { .. } => "square",
			Constraint::R1cs { .. } => "r1cs",
			Constraint::Generic { .. } => "basic",
			Constraint::Poseidon { .. } => "poseidon",
			Constraint::EcAdd { .. } => "ec_add",
			Constraint::EcScale { .. } => "ec_scale",
			Constraint::EcEndoscale { .. } => "ec_endoscale",
		}
	}
}

/// Lowers an accepted constraint into gate rows.
pub(crate) fn lower<F: FieldBytes>(
	sys: &mut CircuitBuilder<F>,
	constraint: &Constraint<F>,
) -> Result<(), ConstraintError> {
	match constraint {
		Constraint::Equal(a, b) => equal::lower(sys, a, b),
		Constraint::Boolean(v) => boolean::lower(sys, v),
		Constraint::Square { arg, out } => square::lower(sys, arg, out),
		Constraint::R1cs { a, b, c } => r1cs::lower(sys, a, b, c),
		Constraint::Generic { l, r, o, m, c } => basic::lower(sys, l, r, o, *m, *c),
		Constraint::Poseidon { state } => poseidon::lower(sys, state),
		Constraint::EcAdd { p1, p2, p3 } => ec_add::lower(sys, p1, p2, p3),
		Constraint::EcScale { state } => ec_scale::lower(sys, state),
		Constraint::EcEndoscale { state } => ec_endoscale::lower(sys, state),
	}
}
