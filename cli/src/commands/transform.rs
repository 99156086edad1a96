use std::path::PathBuf;

use anstyle::*;
use anyhow::{Context, Result};
use clap::Parser;
use fibtrace_core::trace::{
  hermes::{transform, HermesProfile},
  write_pretty,
};

use crate::util::write_status;

#[derive(Parser)]
#[command(
  name = "transform",
  about = "Convert a Hermes sampling profile into Chrome trace events"
)]
pub struct TransformCmd {
  /// Hermes profile written by the sampling profiler.
  pub input: PathBuf,

  /// Where to write the Chrome trace events.
  pub output: PathBuf,
}

impl TransformCmd {
  pub fn run(&self) -> Result<()> {
    let profile = HermesProfile::load(&self.input)
      .with_context(|| format!("while reading {}", self.input.display()))?;
    let events = transform(&profile)?;
    write_pretty(&self.output, &events)
      .with_context(|| format!("while writing {}", self.output.display()))?;

    let green = AnsiColor::Green.on_default().effects(Effects::BOLD);
    write_status(
      &green,
      "Wrote",
      format!("{} events to {}", events.len(), self.output.display()).as_str(),
    );
    Ok(())
  }
}
