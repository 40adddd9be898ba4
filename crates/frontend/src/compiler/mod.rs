// Copyright 2025 Irreducible Inc.
use std::collections::{BTreeMap, HashMap};

use ark_ff::{One, Zero};
use sha2::{Digest as _, Sha256};
use trellis_core::{COLUMNS, ConstraintError, FieldBytes, GateKind, GateVector};

use crate::expr::Expr;

pub mod constraint;
mod digest;
mod witness;


use constraint::{Constraint, PoseidonParams};

/// A variable known to the builder: either supplied by the caller or
/// allocated during lowering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Var {
	/// Caller-supplied variable, indexed from 1.
	External(u32),
	/// Builder-allocated intermediate, defined by a stored formula.
	Internal(u64),
}

/// Row coordinate of a gate, relative to the public input block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Row {
	/// Row `i` of the public input block.
	PublicInput(u32),
	/// Row `i` after the public input block.
	AfterPublicInput(u32),
}

impl Row {
	/// Absolute row index once the public input size is known.
	fn to_absolute(self, public_input_size: u32) -> u64 {
		match self {
			Row::PublicInput(i) => i as u64,
			Row::AfterPublicInput(i) => i as u64 + public_input_size as u64,
		}
	}
}

/// A wire position. Gate rows have columns `0..3`; the unused endomul slot
/// stores a self-loop at column 3, one past the wire columns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Position {
	pub(crate) row: Row,
	pub(crate) col: u8,
}

/// One unfinalized gate: kind, row, the previous positions of the three
/// wires and the selector coefficients.
#[derive(Clone, Debug)]
struct GateSpec<F> {
	kind: GateKind,
	row: Row,
	l: Position,
	r: Position,
	o: Position,
	coeffs: Vec<F>,
}

/// Formula of an internal variable: `Σ coeff·var` plus an optional
/// constant offset.
#[derive(Clone, Debug)]
struct InternalVar<F> {
	terms: Vec<(F, Var)>,
	constant: Option<F>,
}

enum Gates<F> {
	Pending(Vec<GateSpec<F>>),
	Finalized,
}

/// Outcome of reducing a linear combination: either no variable remains, or
/// a single one carries the whole combination.
pub(crate) enum Reduced {
	Constant,
	Var(Var),
}

/// Incremental builder of a PLONK gate table.
///
/// The builder accepts high-level [`Constraint`]s over three-wire rows and
/// compiles each one into gate rows as it arrives. Linear combinations wider
/// than a row are decomposed through fresh internal variables, each backed
/// by a generic gate and a recorded formula used later for witness
/// generation. Every wire placement is threaded into a per-variable chain of
/// positions, which the downstream prover closes into the cycles of the copy
/// permutation.
///
/// A SHA-256 context accumulates every accepted constraint; [`digest`]
/// fingerprints the sequence at any point.
///
/// Finalization is one-shot: [`finalize`] synthesizes the public-input rows
/// and streams the whole table into a [`GateVector`] sink, after which no
/// further constraints are accepted. [`compute_witness`] is independent of
/// finalization and may run before or after it.
///
/// [`compute_witness`]: Self::compute_witness
/// [`digest`]: Self::digest
/// [`finalize`]: Self::finalize
pub struct CircuitBuilder<F: FieldBytes> {
	/// Positions each variable occupies, oldest first.
	equivalence_classes: HashMap<Var, Vec<Position>>,
	/// Formulas of the allocated internal variables, indexed by id.
	internal_vars: Vec<InternalVar<F>>,
	/// Per-row wire occupancy, the template for witness generation.
	rows: Vec<[Option<Var>; COLUMNS]>,
	gates: Gates<F>,
	/// Number of rows added after the public input block.
	next_row: u32,
	hash: Sha256,
	constraints: u32,
	public_input_size: Option<u32>,
	auxiliary_input_size: u32,
	poseidon_params: Option<PoseidonParams<F>>,
}

impl<F: FieldBytes> CircuitBuilder<F> {
	/// Creates an empty builder.
	pub fn new() -> Self {
		let mut hash = Sha256::new();
		hash.update(b"plonk_constraint_system");
		CircuitBuilder {
			equivalence_classes: HashMap::new(),
			internal_vars: Vec::new(),
			rows: Vec::new(),
			gates: Gates::Pending(Vec::new()),
			next_row: 0,
			hash,
			constraints: 0,
			public_input_size: None,
			auxiliary_input_size: 0,
			poseidon_params: None,
		}
	}

	/// Creates a builder able to lower Poseidon constraints with the given
	/// round constants.
	pub fn with_poseidon_params(params: PoseidonParams<F>) -> Self {
		let mut sys = Self::new();
		sys.poseidon_params = Some(params);
		sys
	}

	/// Accepts a constraint: hashes it into the circuit digest, then lowers
	/// it into gate rows and internal variables.
	///
	/// The digest absorbs the constraint before lowering, so a constraint
	/// rejected by one of the eager constant checks still leaves its trace
	/// in the hash; the accepted count does not move on failure.
	pub fn add_constraint(&mut self, constraint: &Constraint<F>) -> Result<(), ConstraintError> {
		if matches!(self.gates, Gates::Finalized) {
			return Err(ConstraintError::FinalizedSystem);
		}
		digest::absorb_constraint(&mut self.hash, constraint);
		constraint::lower(self, constraint)?;
		self.constraints += 1;
		Ok(())
	}

	/// Declares the number of public inputs.
	///
	/// # Panics
	///
	/// Panics on a second call.
	pub fn set_public_input_size(&mut self, size: u32) {
		assert!(
			self.public_input_size.is_none(),
			"public input size can only be set once"
		);
		self.public_input_size = Some(size);
	}

	/// Declares the number of auxiliary (private) inputs.
	pub fn set_auxiliary_input_size(&mut self, size: u32) {
		self.auxiliary_input_size = size;
	}

	/// The declared public input size, if set.
	pub fn public_input_size(&self) -> Option<u32> {
		self.public_input_size
	}

	/// The declared auxiliary input size.
	pub fn auxiliary_input_size(&self) -> u32 {
		self.auxiliary_input_size
	}

	/// Number of accepted constraints.
	pub fn n_constraints(&self) -> u32 {
		self.constraints
	}

	/// Number of gate rows added after the public input block.
	pub fn n_rows(&self) -> u32 {
		self.next_row
	}

	/// Fingerprint of the constraint sequence accepted so far.
	///
	/// An MD5 digest of the running SHA-256 state. Callable at any time; a
	/// pure function of the ordered sequence of accepted constraints.
	pub fn digest(&self) -> [u8; 16] {
		digest::fingerprint(&self.hash)
	}

	/// Emits the finalized gate table into `sink`: the synthesized
	/// public-input gates in ascending row order, then every user gate in
	/// insertion order, all with absolute row indices.
	///
	/// Each public-input row `r` is a generic gate with selectors
	/// `[1, 0, 0, 0, 0]` wiring external variable `r + 1` at column 0; its
	/// other wires self-loop.
	///
	/// # Panics
	///
	/// Panics if the public input size was never set, or on a second call.
	pub fn finalize(&mut self, sink: &mut impl GateVector<F>) {
		let n = self
			.public_input_size
			.expect("public input size must be set before finalization");
		let pending = match std::mem::replace(&mut self.gates, Gates::Finalized) {
			Gates::Pending(pending) => pending,
			Gates::Finalized => panic!("CircuitBuilder::finalize called twice"),
		};

		let mut public_gates = Vec::with_capacity(n as usize);
		for r in 0..n {
			let row = Row::PublicInput(r);
			let lp = self.wire(Var::External(r + 1), row, 0);
			public_gates.push(GateSpec {
				kind: GateKind::Generic,
				row,
				l: lp,
				r: Position { row, col: 1 },
				o: Position { row, col: 2 },
				coeffs: vec![F::one(), F::zero(), F::zero(), F::zero(), F::zero()],
			});
		}

		for gate in public_gates.into_iter().chain(pending) {
			sink.add_raw(
				gate.kind,
				gate.row.to_absolute(n),
				gate.l.row.to_absolute(n),
				gate.l.col,
				gate.r.row.to_absolute(n),
				gate.r.col,
				gate.o.row.to_absolute(n),
				gate.o.col,
				&gate.coeffs,
			);
		}
	}

	/// Records that `v` occupies `(row, col)` and returns the variable's
	/// previous position; a variable seen for the first time points at
	/// itself.
	fn wire(&mut self, v: Var, row: Row, col: u8) -> Position {
		let pos = Position { row, col };
		let class = self.equivalence_classes.entry(v).or_default();
		let prev = class.last().copied().unwrap_or(pos);
		class.push(pos);
		prev
	}

	/// Appends a gate at the next row with the given wire back-pointers and
	/// row template.
	fn add_row(
		&mut self,
		vars: [Option<Var>; COLUMNS],
		kind: GateKind,
		l: Position,
		r: Position,
		o: Position,
		coeffs: Vec<F>,
	) -> Result<(), ConstraintError> {
		let Gates::Pending(gates) = &mut self.gates else {
			return Err(ConstraintError::FinalizedSystem);
		};
		gates.push(GateSpec {
			kind,
			row: Row::AfterPublicInput(self.next_row),
			l,
			r,
			o,
			coeffs,
		});
		self.rows.push(vars);
		self.next_row += 1;
		Ok(())
	}

	/// Appends a gate row, wiring each occupied slot and self-looping the
	/// empty ones.
	fn add_gate_row(
		&mut self,
		kind: GateKind,
		vars: [Option<Var>; COLUMNS],
		coeffs: Vec<F>,
	) -> Result<(), ConstraintError> {
		let row = Row::AfterPublicInput(self.next_row);
		let mut positions = [Position { row, col: 0 }; COLUMNS];
		for (col, slot) in vars.iter().enumerate() {
			positions[col] = match slot {
				Some(v) => self.wire(*v, row, col as u8),
				None => Position {
					row,
					col: col as u8,
				},
			};
		}
		let [l, r, o] = positions;
		self.add_row(vars, kind, l, r, o, coeffs)
	}

	fn add_generic_gate(
		&mut self,
		l: Option<Var>,
		r: Option<Var>,
		o: Option<Var>,
		coeffs: [F; 5],
	) -> Result<(), ConstraintError> {
		self.add_gate_row(GateKind::Generic, [l, r, o], coeffs.to_vec())
	}

	/// Allocates a fresh internal variable computed as
	/// `Σ terms + constant`.
	fn create_internal(&mut self, constant: Option<F>, terms: Vec<(F, Var)>) -> Var {
		let id = self.internal_vars.len() as u64;
		self.internal_vars.push(InternalVar { terms, constant });
		Var::Internal(id)
	}

	/// Collapses a linear combination to a scalar and at most one variable,
	/// spilling intermediates through generic gates.
	fn reduce_lincom(&mut self, x: &Expr<F>) -> Result<(F, Reduced), ConstraintError> {
		let (constant, raw_terms) = x.to_constant_and_terms();
		// Canonical form on the reduction path: sorted, merged, zero
		// coefficients dropped.
		let mut acc: BTreeMap<u32, F> = BTreeMap::new();
		for (c, i) in raw_terms {
			let sum = acc.get(&i).copied().unwrap_or_else(F::zero) + c;
			if sum.is_zero() {
				acc.remove(&i);
			} else {
				acc.insert(i, sum);
			}
		}
		let terms: Vec<(F, u32)> = acc.into_iter().map(|(i, c)| (c, i)).collect();
		match (constant, terms.as_slice()) {
			(Some(c), []) => Ok((c, Reduced::Constant)),
			(None, []) => Ok((F::zero(), Reduced::Constant)),
			(None, [(ls, lx)]) => Ok((*ls, Reduced::Var(Var::External(*lx)))),
			(Some(c), [(ls, lx)]) => {
				// res = ls·lx + c
				let lv = Var::External(*lx);
				let res = self.create_internal(Some(c), vec![(*ls, lv)]);
				self.add_generic_gate(
					Some(lv),
					None,
					Some(res),
					[*ls, F::zero(), -F::one(), F::zero(), c],
				)?;
				Ok((F::one(), Reduced::Var(res)))
			}
			(constant, [(ls, lx), tail @ ..]) => {
				let (rs, rx) = self.completely_reduce(tail)?;
				let lv = Var::External(*lx);
				// res = ls·lx + rs·rx + constant
				let res = self.create_internal(constant, vec![(*ls, lv), (rs, rx)]);
				self.add_generic_gate(
					Some(lv),
					Some(rx),
					Some(res),
					[*ls, rs, -F::one(), F::zero(), constant.unwrap_or_else(F::zero)],
				)?;
				Ok((F::one(), Reduced::Var(res)))
			}
		}
	}

	/// Folds a term list into a single variable, rightmost pair first. The
	/// right-leaning chain this produces is load-bearing: gate count and
	/// row order follow from it.
	fn completely_reduce(&mut self, terms: &[(F, u32)]) -> Result<(F, Var), ConstraintError> {
		let ((last_s, last_x), init) = terms.split_last().expect("reducing an empty term list");
		let mut acc = (*last_s, Var::External(*last_x));
		for &(ls, lx) in init.iter().rev() {
			let (rs, rx) = acc;
			let lv = Var::External(lx);
			// res = ls·lx + rs·rx
			let res = self.create_internal(None, vec![(ls, lv), (rs, rx)]);
			self.add_generic_gate(
				Some(lv),
				Some(rx),
				Some(res),
				[ls, rs, -F::one(), F::zero(), F::zero()],
			)?;
			acc = (F::one(), res);
		}
		Ok(acc)
	}

	/// Reduces a linear combination all the way to a raw variable.
	fn reduce_to_v(&mut self, x: &Expr<F>) -> Result<Var, ConstraintError> {
		match self.reduce_lincom(x)? {
			(s, Reduced::Var(v)) if s.is_one() => Ok(v),
			(s, Reduced::Var(v)) => {
				// sv = s·v
				let sv = self.create_internal(None, vec![(s, v)]);
				self.add_generic_gate(
					Some(v),
					None,
					Some(sv),
					[s, F::zero(), -F::one(), F::zero(), F::zero()],
				)?;
				Ok(sv)
			}
			(s, Reduced::Constant) => {
				// cv is pinned to the constant s.
				let cv = self.create_internal(Some(s), vec![]);
				self.add_generic_gate(
					Some(cv),
					None,
					None,
					[F::one(), F::zero(), F::zero(), F::zero(), -s],
				)?;
				Ok(cv)
			}
		}
	}
}

impl<F: FieldBytes> Default for CircuitBuilder<F> {
	fn default() -> Self {
		CircuitBuilder::new()
	}
}
