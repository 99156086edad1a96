use itertools::{Itertools, MinMaxResult};
use serde::Serialize;
use strum_macros::{Display, EnumString};

use super::TraceEvent;
use crate::utils::TimeDiffOpts;

/// What the first event is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum Baseline {
  /// The first event is diffed against itself, so the output has one entry
  /// per event and starts with `0`.
  #[default]
  #[strum(to_string = "first", serialize = "first-event")]
  FirstEvent,
  /// Only consecutive pairs are diffed; the output has one entry fewer than
  /// the input.
  #[strum(to_string = "skip")]
  Skip,
}

/// Differences between consecutive timestamps.
pub fn time_diffs(timestamps: impl IntoIterator<Item = f64>, baseline: Baseline) -> Vec<f64> {
  let mut timestamps = timestamps.into_iter().peekable();
  let first = match baseline {
    Baseline::FirstEvent => timestamps.peek().map(|_| 0.0),
    Baseline::Skip => None,
  };
  first
    .into_iter()
    .chain(timestamps.tuple_windows().map(|(prev, next)| next - prev))
    .collect()
}

/// Differences between consecutive events. Events without a timestamp, such
/// as Chrome metadata events, are left out.
#[tracing::instrument(level = "debug", skip(events), fields(events = events.len()))]
pub fn event_time_diffs(events: &[TraceEvent], opts: &TimeDiffOpts) -> Vec<f64> {
  let timestamps = events.iter().filter_map(|event| event.ts).collect_vec();
  let skipped = events.len() - timestamps.len();
  if skipped > 0 {
    tracing::debug!(skipped, "ignoring events without a timestamp");
  }
  time_diffs(timestamps, opts.baseline())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeDiffSummary {
  pub count: usize,
  pub total: f64,
  pub min: f64,
  pub max: f64,
  pub mean: f64,
}

impl TimeDiffSummary {
  /// `None` for an empty slice.
  pub fn from_diffs(diffs: &[f64]) -> Option<Self> {
    let (min, max) = match diffs.iter().copied().minmax_by(f64::total_cmp) {
      MinMaxResult::NoElements => return None,
      MinMaxResult::OneElement(value) => (value, value),
      MinMaxResult::MinMax(min, max) => (min, max),
    };
    let total: f64 = diffs.iter().sum();
    Some(Self {
      count: diffs.len(),
      total,
      min,
      max,
      mean: total / diffs.len() as f64,
    })
  }
}
