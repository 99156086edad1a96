//! Trace files produced by the Hermes sampling profiler and by Chrome's
//! trace event format.

pub mod hermes;
mod timediff;

pub use timediff::*;

use std::{
  convert::Infallible,
  fs::File,
  io::{BufWriter, Write},
  path::{Path, PathBuf},
  str::FromStr,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TraceError {
  #[error("failed to access {path}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("malformed trace json")]
  Json(#[from] serde_json::Error),
  #[error("trace has no `{0}` list")]
  MissingField(&'static str),
}

/// Which event list of a trace file to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, Serialize)]
pub enum TraceKind {
  /// Reads `samples`.
  #[strum(serialize = "HERMES")]
  #[serde(rename = "HERMES")]
  Hermes,
  /// Reads `traceEvents`.
  #[default]
  #[strum(serialize = "CHROME")]
  #[serde(rename = "CHROME")]
  Chrome,
}

impl TraceKind {
  pub fn field(&self) -> &'static str {
    match self {
      TraceKind::Hermes => "samples",
      TraceKind::Chrome => "traceEvents",
    }
  }
}

/// Only the exact string `HERMES` selects Hermes samples; anything else is
/// treated as a Chrome trace.
impl FromStr for TraceKind {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(if s == "HERMES" {
      TraceKind::Hermes
    } else {
      TraceKind::Chrome
    })
  }
}

/// A single trace event. Only the timestamp is interpreted; every other field
/// is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
  #[serde(default, with = "numeric::option", skip_serializing_if = "Option::is_none")]
  pub ts: Option<f64>,
  #[serde(flatten)]
  pub fields: Map<String, Value>,
}

impl TraceEvent {
  pub fn at(ts: f64) -> Self {
    Self {
      ts: Some(ts),
      fields: Map::new(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceFile {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub trace_events: Option<Vec<TraceEvent>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub samples: Option<Vec<TraceEvent>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TraceDocument {
  // The JSON array form of the trace event format. Tried first, since
  // `TraceFile` would also accept a sequence.
  Array(Vec<TraceEvent>),
  Object(TraceFile),
}

impl TraceFile {
  #[tracing::instrument(level = "debug")]
  pub fn load(path: &Path) -> Result<Self, TraceError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TraceError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    contents.parse()
  }

  /// The event list selected by `kind`.
  pub fn events(&self, kind: TraceKind) -> Result<&[TraceEvent], TraceError> {
    let events = match kind {
      TraceKind::Hermes => self.samples.as_deref(),
      TraceKind::Chrome => self.trace_events.as_deref(),
    };
    events.ok_or(TraceError::MissingField(kind.field()))
  }
}

impl FromStr for TraceFile {
  type Err = TraceError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(match serde_json::from_str(s)? {
      TraceDocument::Object(file) => file,
      TraceDocument::Array(events) => TraceFile {
        trace_events: Some(events),
        samples: None,
      },
    })
  }
}

/// Write `value` as JSON indented by two spaces.
pub fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), TraceError> {
  let io_err = |source| TraceError::Io {
    path: path.to_path_buf(),
    source,
  };
  let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
  serde_json::to_writer_pretty(&mut writer, value)?;
  writer.flush().map_err(io_err)?;
  tracing::debug!(path = %path.display(), "wrote json");
  Ok(())
}

/// Hermes writes numbers as strings; accept both forms.
pub(crate) mod numeric {
  use std::{fmt::Display, str::FromStr};

  use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw<T> {
    Number(T),
    Text(String),
  }

  fn parse<T, E>(raw: Raw<T>) -> Result<T, E>
  where
    T: FromStr,
    T::Err: Display,
    E: Error,
  {
    match raw {
      Raw::Number(value) => Ok(value),
      Raw::Text(text) => text.trim().parse().map_err(E::custom),
    }
  }

  pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
  where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
  {
    parse(Raw::deserialize(deserializer)?)
  }

  pub mod option {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
      D: Deserializer<'de>,
      T: Deserialize<'de> + FromStr,
      T::Err: Display,
    {
      Option::<Raw<T>>::deserialize(deserializer)?
        .map(parse::<T, D::Error>)
        .transpose()
    }

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
      S: Serializer,
      T: Serialize,
    {
      value.serialize(serializer)
    }
  }
}
