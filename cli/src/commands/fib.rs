use std::time::Instant;

use anstyle::*;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use fibtrace_core::{
  utils::{with_max_index, GeneratorOpts},
  SequenceGenerator, Term,
};
use fibtrace_core::sequence::BigUint;

use crate::util::{elapsed, write_status};

/// Numeric type used for the terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Backend {
  /// Arbitrary precision, exact for any index.
  #[default]
  Big,
  /// Exact up to index 93.
  U64,
  /// Exact up to index 186.
  U128,
  /// Double precision; inexact past index 78.
  F64,
}

#[derive(Parser)]
#[command(name = "fib", about = "Compute a term of the Fibonacci sequence")]
pub struct FibCmd {
  /// Index of the term, starting at 0.
  #[arg(allow_negative_numbers = true)]
  pub n: i64,

  #[arg(long, value_enum, env = "FIBTRACE_BACKEND", default_value_t)]
  pub backend: Backend,

  /// Print every term up to N instead of only the last one.
  #[arg(long, action)]
  pub all: bool,

  /// Refuse indices above this value.
  #[arg(long)]
  pub max_index: Option<u64>,
}

impl FibCmd {
  pub fn run(&self) -> Result<()> {
    let mut opts = GeneratorOpts::new();
    if let Some(max) = self.max_index {
      opts = opts.with_options([with_max_index(max)]);
    }
    let generator = SequenceGenerator::new(opts);

    let start_time = Instant::now();
    match self.backend {
      Backend::Big => self.report::<BigUint>(&generator)?,
      Backend::U64 => self.report::<u64>(&generator)?,
      Backend::U128 => self.report::<u128>(&generator)?,
      Backend::F64 => self.report::<f64>(&generator)?,
    }

    let green = AnsiColor::Green.on_default().effects(Effects::BOLD);
    write_status(
      &green,
      "Finished",
      format!(
        "computing with {} in {}",
        self.backend_name(),
        elapsed(start_time.elapsed())
      )
      .as_str(),
    );
    Ok(())
  }

  fn report<T: Term>(&self, generator: &SequenceGenerator) -> Result<()> {
    if self.all {
      for (index, term) in generator.terms::<T>(self.n)?.iter().enumerate() {
        println!("F({index}) = {term}");
      }
    } else {
      let computed = generator.compute_with_parity::<T>(self.n)?;
      println!("F({}) = {}", computed.index, computed.value);
      println!(
        "F({}) is {}",
        computed.index,
        if computed.is_even { "even" } else { "odd" }
      );
    }
    Ok(())
  }

  fn backend_name(&self) -> &'static str {
    match self.backend {
      Backend::Big => BigUint::NAME,
      Backend::U64 => u64::NAME,
      Backend::U128 => u128::NAME,
      Backend::F64 => f64::NAME,
    }
  }
}
