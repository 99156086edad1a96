pub mod commands;
mod util;

use clap::{Parser, Subcommand};

use crate::commands::{fib::FibCmd, time_diff::TimeDiffCmd, transform::TransformCmd};

pub const FIBTRACE_VERSION_MESSAGE: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("VERGEN_GIT_SHA"),
  " ",
  env!("VERGEN_GIT_COMMIT_DATE"),
  ", built ",
  env!("VERGEN_BUILD_TIMESTAMP"),
  ")"
);

/// Fibonacci workload and Hermes/Chrome trace tooling.
#[derive(Parser)]
#[command(name = "fibtrace", author, long_about = None, version = FIBTRACE_VERSION_MESSAGE)]
pub struct FibtraceCli {
  #[clap(subcommand)]
  pub command: FibtraceCommands,

  /// Print a span tree filtered by RUST_TRACER instead of plain logs.
  #[clap(long, global = true, action)]
  pub profile: bool,
}

#[derive(Subcommand)]
pub enum FibtraceCommands {
  Fib(FibCmd),
  TimeDiff(TimeDiffCmd),
  Transform(TransformCmd),
}

impl FibtraceCli {
  pub fn run(&self) -> anyhow::Result<()> {
    commands::init_logging(self.profile);
    match &self.command {
      FibtraceCommands::Fib(cmd) => cmd.run(),
      FibtraceCommands::TimeDiff(cmd) => cmd.run(),
      FibtraceCommands::Transform(cmd) => cmd.run(),
    }
  }
}
