// Copyright 2025 Irreducible Inc.
use ark_bls12_381::Fr;
use rand::{Rng, SeedableRng, rngs::StdRng};
use trellis_frontend::{CircuitBuilder, Constraint, Expr};

fn random_expr(rng: &mut StdRng) -> Expr<Fr> {
	let mut term =
		|rng: &mut StdRng| Expr::var(rng.random_range(1..=10)).scale(Fr::from(rng.random::<u64>()));
	let mut expr = term(rng);
	for _ in 0..rng.random_range(0..3) {
		expr = expr + term(rng);
	}
	if rng.random::<bool>() {
		expr = expr + Expr::constant(Fr::from(rng.random::<u64>()));
	}
	expr
}

fn random_constraint(rng: &mut StdRng) -> Constraint<Fr> {
	match rng.random_range(0..3) {
		0 => Constraint::Equal(random_expr(rng), random_expr(rng)),
		1 => Constraint::Boolean(random_expr(rng)),
		_ => Constraint::R1cs {
			a: random_expr(rng),
			b: random_expr(rng),
			c: random_expr(rng),
		},
	}
}

#[test]
fn test_digest_agrees_at_every_prefix() {
	let mut rng = StdRng::seed_from_u64(42);
	let constraints: Vec<_> = (0..100).map(|_| random_constraint(&mut rng)).collect();

	let mut a = CircuitBuilder::<Fr>::new();
	let mut b = CircuitBuilder::<Fr>::new();
	assert_eq!(a.digest(), b.digest());
	for constraint in &constraints {
		a.add_constraint(constraint).unwrap();
		b.add_constraint(constraint).unwrap();
		assert_eq!(a.digest(), b.digest());
	}
}

#[test]
fn test_digest_diverges_on_different_history() {
	let mut rng = StdRng::seed_from_u64(7);
	let constraints: Vec<_> = (0..10).map(|_| random_constraint(&mut rng)).collect();

	let mut a = CircuitBuilder::<Fr>::new();
	let mut b = CircuitBuilder::<Fr>::new();
	for (i, constraint) in constraints.iter().enumerate() {
		a.add_constraint(constraint).unwrap();
		// Builder b skips one constraint in the middle.
		if i != 4 {
			b.add_constraint(constraint).unwrap();
		}
	}
	assert_ne!(a.digest(), b.digest());
}

#[test]
fn test_digest_unaffected_by_sizes_and_finalization() {
	let mut rng = StdRng::seed_from_u64(3);
	let constraints: Vec<_> = (0..10).map(|_| random_constraint(&mut rng)).collect();

	let mut a = CircuitBuilder::<Fr>::new();
	let mut b = CircuitBuilder::<Fr>::new();
	for constraint in &constraints {
		a.add_constraint(constraint).unwrap();
		b.add_constraint(constraint).unwrap();
	}
	b.set_public_input_size(10);
	b.set_auxiliary_input_size(5);
	let mut table = trellis_core::GateTable::new();
	b.finalize(&mut table);
	assert_eq!(a.digest(), b.digest());
}
