//! Iterative generation of the sequence seeded with 0 and 1 where every later
//! term is the sum of the two before it.

mod term;

pub use num::BigUint;
pub use term::*;

use std::mem;

use thiserror::Error;

use crate::utils::GeneratorOpts;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
  #[error("invalid argument: index must be non-negative, got {0}")]
  InvalidArgument(i64),
  #[error("index {index} exceeds the configured maximum of {max}")]
  IndexTooLarge { index: u64, max: u64 },
  #[error("term at index {index} does not fit in {backend}")]
  Overflow { index: u64, backend: &'static str },
}

/// A single computed term together with its parity.
#[derive(Debug, Clone, PartialEq)]
pub struct Computed<T> {
  pub index: u64,
  pub value: T,
  pub is_even: bool,
}

/// Rolling state of the recurrence.
///
/// Only the two most recent terms are kept. `last_is_even` always describes
/// `current`.
#[derive(Debug, Clone)]
pub struct Sequence<T: Term> {
  prev: T,
  current: T,
  index: u64,
  last_is_even: bool,
  // `current` has not been handed out by the iterator yet.
  pending: bool,
  exhausted: bool,
}

impl<T: Term> Sequence<T> {
  /// A fresh sequence positioned at index 0.
  pub fn new() -> Self {
    Self {
      prev: T::zero(),
      current: T::zero(),
      index: 0,
      last_is_even: true,
      pending: true,
      exhausted: false,
    }
  }

  pub fn index(&self) -> u64 {
    self.index
  }

  pub fn current(&self) -> &T {
    &self.current
  }

  pub fn last_is_even(&self) -> bool {
    self.last_is_even
  }

  /// Move to the next index and return the new term.
  pub fn advance(&mut self) -> Result<&T, SequenceError> {
    let index = self.index + 1;
    let next = if index == 1 {
      T::one()
    } else {
      self
        .current
        .add(&self.prev)
        .ok_or(SequenceError::Overflow {
          index,
          backend: T::NAME,
        })?
    };
    self.prev = mem::replace(&mut self.current, next);
    self.index = index;
    self.last_is_even = self.current.is_even();
    Ok(&self.current)
  }

  /// Advance until the sequence sits on `index`.
  pub fn advance_to(&mut self, index: u64) -> Result<&T, SequenceError> {
    while self.index < index {
      self.advance()?;
    }
    Ok(&self.current)
  }

  fn snapshot(&self) -> Computed<T> {
    Computed {
      index: self.index,
      value: self.current.clone(),
      is_even: self.last_is_even,
    }
  }
}

impl<T: Term> Default for Sequence<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Term> Iterator for Sequence<T> {
  type Item = T;

  /// Yields terms starting at index 0 and stops at the first term the
  /// backend cannot represent.
  fn next(&mut self) -> Option<T> {
    if self.exhausted {
      return None;
    }
    if self.pending {
      self.pending = false;
      return Some(self.current.clone());
    }
    match self.advance() {
      Ok(term) => Some(term.clone()),
      Err(_) => {
        self.exhausted = true;
        None
      }
    }
  }
}

/// Computes terms by index. Every call starts from a fresh [`Sequence`], so
/// nothing is shared between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceGenerator {
  opts: GeneratorOpts,
}

impl SequenceGenerator {
  pub fn new(opts: GeneratorOpts) -> Self {
    Self { opts }
  }

  pub fn opts(&self) -> &GeneratorOpts {
    &self.opts
  }

  /// The term at index `n`.
  pub fn compute<T: Term>(&self, n: i64) -> Result<T, SequenceError> {
    self.compute_with_parity(n).map(|computed| computed.value)
  }

  /// The term at index `n` along with the parity flag tracked while
  /// computing it.
  #[tracing::instrument(level = "debug", skip(self), fields(backend = T::NAME))]
  pub fn compute_with_parity<T: Term>(&self, n: i64) -> Result<Computed<T>, SequenceError> {
    let index = self.check_index(n)?;
    let mut sequence = Sequence::<T>::new();
    sequence.advance_to(index)?;
    let computed = sequence.snapshot();
    tracing::debug!(index, is_even = computed.is_even, "computed term");
    Ok(computed)
  }

  /// All terms from index 0 through `n`.
  #[tracing::instrument(level = "debug", skip(self), fields(backend = T::NAME))]
  pub fn terms<T: Term>(&self, n: i64) -> Result<Vec<T>, SequenceError> {
    let index = self.check_index(n)?;
    let mut terms = Vec::new();
    let mut sequence = Sequence::<T>::new();
    terms.push(sequence.current().clone());
    while sequence.index() < index {
      terms.push(sequence.advance()?.clone());
    }
    Ok(terms)
  }

  fn check_index(&self, n: i64) -> Result<u64, SequenceError> {
    let index = u64::try_from(n).map_err(|_| SequenceError::InvalidArgument(n))?;
    if let Some(max) = self.opts.max_index() {
      if index > max {
        return Err(SequenceError::IndexTooLarge { index, max });
      }
    }
    Ok(index)
  }
}
