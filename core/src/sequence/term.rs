use std::fmt::{Debug, Display};

use num::{BigUint, Integer, One, Zero};

/// Numeric representation of a sequence term.
///
/// Fixed-width backends report overflow by returning `None` from [`Term::add`]
/// instead of wrapping. The floating-point backend never fails and loses
/// exact-integer precision once terms pass 2^53.
pub trait Term: Clone + Debug + Display + PartialEq {
  /// Short name used in logs and on the command line.
  const NAME: &'static str;

  fn zero() -> Self;
  fn one() -> Self;

  /// Sum of two terms, or `None` if the result is not representable.
  fn add(&self, other: &Self) -> Option<Self>;

  fn is_even(&self) -> bool;
}

impl Term for u64 {
  const NAME: &'static str = "u64";

  fn zero() -> Self {
    0
  }

  fn one() -> Self {
    1
  }

  fn add(&self, other: &Self) -> Option<Self> {
    self.checked_add(*other)
  }

  fn is_even(&self) -> bool {
    self % 2 == 0
  }
}

impl Term for u128 {
  const NAME: &'static str = "u128";

  fn zero() -> Self {
    0
  }

  fn one() -> Self {
    1
  }

  fn add(&self, other: &Self) -> Option<Self> {
    self.checked_add(*other)
  }

  fn is_even(&self) -> bool {
    self % 2 == 0
  }
}

impl Term for f64 {
  const NAME: &'static str = "f64";

  fn zero() -> Self {
    0.0
  }

  fn one() -> Self {
    1.0
  }

  // Saturates to infinity past index 1476.
  fn add(&self, other: &Self) -> Option<Self> {
    Some(self + other)
  }

  fn is_even(&self) -> bool {
    self % 2.0 == 0.0
  }
}

impl Term for BigUint {
  const NAME: &'static str = "big";

  fn zero() -> Self {
    Zero::zero()
  }

  fn one() -> Self {
    One::one()
  }

  fn add(&self, other: &Self) -> Option<Self> {
    Some(self + other)
  }

  fn is_even(&self) -> bool {
    Integer::is_even(self)
  }
}
