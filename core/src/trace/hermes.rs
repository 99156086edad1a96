//! Conversion of a Hermes sampling profile into Chrome duration events.
//!
//! Each sample names its innermost stack frame. Walking the `parent` links
//! gives the full stack. Consecutive stacks are compared, and the frames that
//! leave or enter the stack turn into `E` and `B` events at the sample's
//! timestamp.

use std::{
  collections::{BTreeMap, HashSet},
  path::Path,
  str::FromStr,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{numeric, TraceError};

pub type FrameId = u64;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
  #[error("sample at index {sample} refers to unknown stack frame {frame}")]
  UnknownFrame { sample: usize, frame: FrameId },
  #[error("stack frame {0} is its own ancestor")]
  CyclicStack(FrameId),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HermesProfile {
  #[serde(default)]
  pub trace_events: Vec<Value>,
  pub samples: Vec<Sample>,
  pub stack_frames: BTreeMap<FrameId, StackFrame>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
  #[serde(deserialize_with = "numeric::deserialize")]
  pub ts: f64,
  #[serde(default, with = "numeric::option")]
  pub pid: Option<u64>,
  #[serde(default, with = "numeric::option")]
  pub tid: Option<u64>,
  #[serde(deserialize_with = "numeric::deserialize")]
  pub sf: FrameId,
  #[serde(default, with = "numeric::option", skip_serializing_if = "Option::is_none")]
  pub weight: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
  pub name: String,
  #[serde(default)]
  pub category: String,
  #[serde(default, with = "numeric::option")]
  pub line: Option<u64>,
  #[serde(default, with = "numeric::option")]
  pub column: Option<u64>,
  #[serde(default, with = "numeric::option")]
  pub func_line: Option<u64>,
  #[serde(default, with = "numeric::option")]
  pub func_column: Option<u64>,
  #[serde(default, with = "numeric::option")]
  pub parent: Option<FrameId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
  #[serde(rename = "B")]
  Begin,
  #[serde(rename = "E")]
  End,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameArgs {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub line: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub column: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub func_line: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub func_column: Option<u64>,
}

impl From<&StackFrame> for FrameArgs {
  fn from(frame: &StackFrame) -> Self {
    Self {
      line: frame.line,
      column: frame.column,
      func_line: frame.func_line,
      func_column: frame.func_column,
    }
  }
}

/// A Chrome trace event with phase `B` or `E`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationEvent {
  pub name: String,
  pub cat: String,
  pub ph: Phase,
  pub ts: f64,
  pub pid: u64,
  pub tid: u64,
  pub args: FrameArgs,
}

impl HermesProfile {
  #[tracing::instrument(level = "debug")]
  pub fn load(path: &Path) -> Result<Self, TraceError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TraceError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Ok(contents.parse()?)
  }

  /// Frame ids from the root down to `leaf`.
  fn stack(&self, sample: usize, leaf: FrameId) -> Result<Vec<FrameId>, TransformError> {
    let mut stack = Vec::new();
    let mut seen = HashSet::new();
    let mut next = Some(leaf);
    while let Some(id) = next {
      let frame = self
        .stack_frames
        .get(&id)
        .ok_or(TransformError::UnknownFrame { sample, frame: id })?;
      if !seen.insert(id) {
        return Err(TransformError::CyclicStack(id));
      }
      stack.push(id);
      next = frame.parent;
    }
    stack.reverse();
    Ok(stack)
  }

  fn event(&self, id: FrameId, ph: Phase, ts: f64, pid: u64, tid: u64) -> DurationEvent {
    // Only ids already resolved by `stack` reach here.
    let frame = &self.stack_frames[&id];
    DurationEvent {
      name: frame.name.clone(),
      cat: frame.category.clone(),
      ph,
      ts,
      pid,
      tid,
      args: frame.into(),
    }
  }
}

impl FromStr for HermesProfile {
  type Err = serde_json::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    serde_json::from_str(s)
  }
}

/// Open frames of one thread, root first, plus where the last sample came
/// from.
struct ThreadStack {
  pid: u64,
  frames: Vec<FrameId>,
  last_ts: f64,
}

/// Convert the samples of `profile`, in order, into balanced duration events.
/// Every frame still open after the last sample of its thread is closed at
/// that sample's timestamp.
#[tracing::instrument(level = "debug", skip_all, fields(samples = profile.samples.len()))]
pub fn transform(profile: &HermesProfile) -> Result<Vec<DurationEvent>, TransformError> {
  let mut threads: BTreeMap<u64, ThreadStack> = BTreeMap::new();
  let mut events = Vec::new();

  for (index, sample) in profile.samples.iter().enumerate() {
    let stack = profile.stack(index, sample.sf)?;
    let pid = sample.pid.unwrap_or_default();
    let tid = sample.tid.unwrap_or_default();
    let thread = threads.entry(tid).or_insert_with(|| ThreadStack {
      pid,
      frames: Vec::new(),
      last_ts: sample.ts,
    });

    let common = thread
      .frames
      .iter()
      .zip(&stack)
      .take_while(|(open, next)| open == next)
      .count();
    for &id in thread.frames[common..].iter().rev() {
      events.push(profile.event(id, Phase::End, sample.ts, thread.pid, tid));
    }
    for &id in &stack[common..] {
      events.push(profile.event(id, Phase::Begin, sample.ts, pid, tid));
    }

    thread.pid = pid;
    thread.frames = stack;
    thread.last_ts = sample.ts;
  }

  for (tid, thread) in threads {
    for &id in thread.frames.iter().rev() {
      events.push(profile.event(id, Phase::End, thread.last_ts, thread.pid, tid));
    }
  }

  tracing::debug!(events = events.len(), "transformed profile");
  Ok(events)
}
