use fibtrace_core::{sequence::BigUint, SequenceError, SequenceGenerator, Term};
use rand::Rng;

#[test]
fn random_indices_obey_recurrence_and_parity() {
  let generator = SequenceGenerator::default();
  let mut rng = rand::thread_rng();
  for _ in 0..50 {
    let i: i64 = rng.gen_range(2..2_000);
    let a = generator.compute::<BigUint>(i - 1).unwrap();
    let b = generator.compute::<BigUint>(i - 2).unwrap();
    let c = generator.compute_with_parity::<BigUint>(i).unwrap();
    assert_eq!(c.value, a + b, "index {i}");
    assert_eq!(c.is_even, i % 3 == 0, "index {i}");
  }
}

#[test]
fn backends_agree_while_exact() {
  let generator = SequenceGenerator::default();
  for i in 0..=93 {
    let big = generator.compute::<BigUint>(i).unwrap();
    let narrow = generator.compute::<u64>(i).unwrap();
    let wide = generator.compute::<u128>(i).unwrap();
    assert_eq!(big, BigUint::from(narrow));
    assert_eq!(big, BigUint::from(wide));
  }
}

#[test]
fn million_terms_without_recursion() {
  // The fib(1000000) CPU workload; the f64 backend keeps it cheap.
  let value = SequenceGenerator::default().compute::<f64>(1_000_000).unwrap();
  assert!(value.is_infinite());
  assert!(!Term::is_even(&value));
}

#[test]
fn every_backend_rejects_negative_indices() {
  let generator = SequenceGenerator::default();
  let err = SequenceError::InvalidArgument(-5);
  assert_eq!(generator.compute::<u64>(-5), Err(err.clone()));
  assert_eq!(generator.compute::<f64>(-5), Err(err.clone()));
  assert_eq!(generator.compute::<BigUint>(-5), Err(err));
}
