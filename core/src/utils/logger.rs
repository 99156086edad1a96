use std::sync::Once;

use tracing_forest::ForestLayer;
use tracing_subscriber::{
  fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

static INIT: Once = Once::new();

/// Set up the logger using `RUST_LOG` as the filter, defaulting to `off`.
///
/// Only the first call to either this or [`setup_tracer`] installs a
/// subscriber.
pub fn setup_logger() {
  INIT.call_once(|| {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
      .with_env_filter(env_filter)
      .with_span_events(FmtSpan::CLOSE)
      .with_writer(std::io::stderr)
      .with_target(false)
      .compact()
      .init();
  });
}

/// Set up a span tree printer using `RUST_TRACER` as the filter, defaulting
/// to `off`.
pub fn setup_tracer() {
  INIT.call_once(|| {
    let env_filter = EnvFilter::try_from_env("RUST_TRACER").unwrap_or_else(|_| EnvFilter::new("off"));
    Registry::default()
      .with(env_filter)
      .with(ForestLayer::default())
      .init();
  });
}
