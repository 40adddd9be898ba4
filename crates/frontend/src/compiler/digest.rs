// Copyright 2025 Irreducible Inc.
//! Hashing of accepted constraints into the circuit fingerprint.
//!
//! The byte layout is part of the external contract: per expression term,
//! the coefficient in fixed-width little-endian field bytes followed by the
//! variable id as an 8-byte little-endian integer, with the constant (when
//! present) leading under the reserved id 0.

use digest::Digest;
use md5::Md5;
use sha2::Sha256;
use trellis_core::FieldBytes;

use crate::{
	compiler::constraint::{Constraint, EndoscaleRound, ScaleRound},
	expr::Expr,
};

/// MD5 head over the current SHA-256 state.
pub(crate) fn fingerprint(hash: &Sha256) -> [u8; 16] {
	let sha = hash.clone().finalize();
	Md5::digest(sha).into()
}

/// Absorbs one constraint: its ASCII tag, then every involved expression in
/// canonical form. For the generic constraint the order is `l, r, o, m, c`,
/// each operand as its selector followed by its expression.
pub(crate) fn absorb_constraint<F: FieldBytes>(hash: &mut Sha256, constraint: &Constraint<F>) {
	hash.update(constraint.tag().as_bytes());
	match constraint {
		Constraint::Equal(a, b) => {
			absorb_expr(hash, a);
			absorb_expr(hash, b);
		}
		Constraint::Boolean(v) => absorb_expr(hash, v),
		Constraint::Square { arg, out } => {
			absorb_expr(hash, arg);
			absorb_expr(hash, out);
		}
		Constraint::R1cs { a, b, c } => {
			absorb_expr(hash, a);
			absorb_expr(hash, b);
			absorb_expr(hash, c);
		}
		Constraint::Generic { l, r, o, m, c } => {
			absorb_operand(hash, l);
			absorb_operand(hash, r);
			absorb_operand(hash, o);
			absorb_field(hash, m);
			absorb_field(hash, c);
		}
		Constraint::Poseidon { state } => {
			for row in state {
				for x in row {
					absorb_expr(hash, x);
				}
			}
		}
		Constraint::EcAdd { p1, p2, p3 } => {
			for (x, y) in [p1, p2, p3] {
				absorb_expr(hash, x);
				absorb_expr(hash, y);
			}
		}
		Constraint::EcScale { state } => {
			for round in state {
				let ScaleRound {
					xt,
					b,
					yt,
					xp,
					l1,
					yp,
					xs,
					ys,
				} = round;
				for x in [xt, b, yt, xp, l1, yp, xs, ys] {
					absorb_expr(hash, x);
				}
			}
		}
		Constraint::EcEndoscale { state } => {
			for round in state {
				let EndoscaleRound {
					b2i1,
					xt,
					b2i,
					xq,
					yt,
					xp,
					l1,
					yp,
					xs,
					ys,
				} = round;
				for x in [b2i1, xt, b2i, xq, yt, xp, l1, yp, xs, ys] {
					absorb_expr(hash, x);
				}
			}
		}
	}
}

fn absorb_field<F: FieldBytes>(hash: &mut Sha256, x: &F) {
	let mut bytes = Vec::with_capacity(F::encoded_len());
	x.append_bytes_le(&mut bytes);
	hash.update(&bytes);
}

fn absorb_expr<F: FieldBytes>(hash: &mut Sha256, x: &Expr<F>) {
	let (terms, _) = x.canonicalize();
	for (coeff, id) in terms {
		absorb_field(hash, &coeff);
		hash.update((id as u64).to_le_bytes());
	}
}

fn absorb_operand<F: FieldBytes>(hash: &mut Sha256, (coeff, x): &(F, Expr<F>)) {
	absorb_field(hash, coeff);
	absorb_expr(hash, x);
}
