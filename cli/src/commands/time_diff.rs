use std::path::PathBuf;

use anstyle::*;
use anyhow::{Context, Result};
use clap::Parser;
use fibtrace_core::{
  trace::{event_time_diffs, TimeDiffSummary},
  utils::{with_baseline, TimeDiffOpts},
  Baseline, TraceFile, TraceKind,
};
use serde::Serialize;

use crate::util::write_status;

#[derive(Parser)]
#[command(
  name = "time-diff",
  about = "Print the time between consecutive events of a trace file"
)]
pub struct TimeDiffCmd {
  /// Trace JSON file.
  pub file: PathBuf,

  /// `HERMES` reads `samples`; any other value reads `traceEvents`.
  #[arg(long, env = "FIBTRACE_TRACE_KIND", default_value = "HERMES")]
  pub kind: TraceKind,

  /// `first` diffs the first event against itself; `skip` starts at the second event.
  #[arg(long, env = "FIBTRACE_BASELINE", default_value = "first")]
  pub baseline: Baseline,

  /// Print the diffs and summary as JSON.
  #[arg(long, action)]
  pub json: bool,
}

/// What `time-diff` prints, also the shape of its `--json` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeDiffReport {
  pub kind: TraceKind,
  pub diffs: Vec<f64>,
  pub summary: Option<TimeDiffSummary>,
}

impl TimeDiffCmd {
  /// Load the trace and diff the selected events.
  pub fn report(&self) -> Result<TimeDiffReport> {
    let file = TraceFile::load(&self.file)
      .with_context(|| format!("while reading {}", self.file.display()))?;
    let events = file.events(self.kind)?;
    let opts = TimeDiffOpts::new().with_options([with_baseline(self.baseline)]);
    let diffs = event_time_diffs(events, &opts);
    let summary = TimeDiffSummary::from_diffs(&diffs);
    tracing::info!(kind = %self.kind, events = events.len(), diffs = diffs.len(), "diffed trace");
    Ok(TimeDiffReport {
      kind: self.kind,
      diffs,
      summary,
    })
  }

  pub fn run(&self) -> Result<()> {
    let report = self.report()?;
    if self.json {
      println!("{}", serde_json::to_string_pretty(&report)?);
      return Ok(());
    }

    for diff in &report.diffs {
      println!("{diff}");
    }
    let green = AnsiColor::Green.on_default().effects(Effects::BOLD);
    match report.summary {
      Some(summary) => write_status(
        &green,
        "Finished",
        format!(
          "{} diffs, total {}, min {}, max {}, mean {:.3}",
          summary.count, summary.total, summary.min, summary.max, summary.mean
        )
        .as_str(),
      ),
      None => write_status(&green, "Finished", "no timestamped events"),
    }
    Ok(())
  }
}
