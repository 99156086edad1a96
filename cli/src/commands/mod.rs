pub mod fib;
pub mod time_diff;
pub mod transform;

use std::env;

use fibtrace_core::utils::{setup_logger, setup_tracer};

/// Install the plain logger, or the span tree printer when profiling. Both
/// default to `info` unless their env filter is already set.
pub fn init_logging(profile: bool) {
  if !profile {
    if env::var("RUST_LOG").is_err() {
      env::set_var("RUST_LOG", "info");
    }
    setup_logger();
  } else {
    if env::var("RUST_TRACER").is_err() {
      env::set_var("RUST_TRACER", "info");
    }
    setup_tracer();
  }
}
