use std::time::Duration;

use anstyle::Style;

pub(crate) fn write_status(style: &Style, status: &str, msg: &str) {
  println!(
    "{}{status:>12}{} {msg}",
    style.render(),
    style.render_reset()
  );
}

pub(crate) fn elapsed(duration: Duration) -> String {
  let secs = duration.as_secs();
  if secs >= 60 {
    format!("{}m {:02}s", secs / 60, secs % 60)
  } else {
    format!("{}.{:02}s", secs, duration.subsec_nanos() / 10_000_000)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn elapsed_formats() {
    assert_eq!(elapsed(Duration::from_millis(1_250)), "1.25s");
    assert_eq!(elapsed(Duration::from_secs(125)), "2m 05s");
  }
}
