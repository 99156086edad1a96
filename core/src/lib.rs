//! # fibtrace core
//!
//! Sequence generation plus the trace processing used to study where a
//! JavaScript workload spends its time: timestamp diffs over trace files and
//! conversion of Hermes sampling profiles into Chrome duration events.

#![warn(unused_extern_crates)]

pub mod sequence;
pub mod trace;
pub mod utils;

pub use sequence::{Computed, Sequence, SequenceError, SequenceGenerator, Term};
pub use trace::{Baseline, TraceError, TraceEvent, TraceFile, TraceKind};
