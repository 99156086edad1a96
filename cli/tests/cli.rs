use std::fs;

use clap::{CommandFactory, Parser};
use fibtrace_cli::{
  commands::{fib::Backend, time_diff::TimeDiffReport},
  FibtraceCli, FibtraceCommands,
};
use fibtrace_core::{Baseline, TraceFile, TraceKind};

const HERMES_LOG: &str = r#"{
  "samples": [
    { "ts": "10", "pid": 1, "tid": "1", "sf": 2 },
    { "ts": "25", "pid": 1, "tid": "1", "sf": 1 }
  ],
  "stackFrames": {
    "1": { "name": "[root]", "category": "root" },
    "2": { "name": "fib", "category": "JavaScript", "parent": 1 }
  }
}"#;

#[test]
fn fib_defaults() {
  let cli = FibtraceCli::try_parse_from(["fibtrace", "fib", "1000"]).unwrap();
  let FibtraceCommands::Fib(cmd) = cli.command else {
    panic!("expected fib");
  };
  assert_eq!(cmd.n, 1000);
  assert_eq!(cmd.backend, Backend::Big);
  assert!(!cmd.all);
  assert!(!cli.profile);
}

#[test]
fn fib_accepts_negative_index_and_rejects_it_at_run() {
  let cli =
    FibtraceCli::try_parse_from(["fibtrace", "fib", "-3", "--backend", "u64", "--profile"]).unwrap();
  assert!(cli.profile);
  let FibtraceCommands::Fib(cmd) = cli.command else {
    panic!("expected fib");
  };
  assert_eq!(cmd.n, -3);
  assert_eq!(cmd.backend, Backend::U64);
  let err = cmd.run().unwrap_err();
  assert!(err.to_string().contains("non-negative"));
}

#[test]
fn fib_overflow_surfaces_as_error() {
  let cli = FibtraceCli::try_parse_from(["fibtrace", "fib", "94", "--backend", "u64"]).unwrap();
  let FibtraceCommands::Fib(cmd) = cli.command else {
    panic!("expected fib");
  };
  assert!(cmd.run().is_err());
}

#[test]
fn unknown_backend_is_rejected() {
  assert!(FibtraceCli::try_parse_from(["fibtrace", "fib", "5", "--backend", "i8"]).is_err());
}

#[test]
fn time_diff_flags() {
  let cli = FibtraceCli::try_parse_from([
    "fibtrace",
    "time-diff",
    "trace.json",
    "--kind",
    "chrome",
    "--baseline",
    "skip",
  ])
  .unwrap();
  let FibtraceCommands::TimeDiff(cmd) = cli.command else {
    panic!("expected time-diff");
  };
  // Only the exact spelling `HERMES` selects samples.
  assert_eq!(cmd.kind, TraceKind::Chrome);
  assert_eq!(cmd.baseline, Baseline::Skip);
}

#[test]
fn time_diff_runs_on_hermes_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("trace-hermes.log");
  fs::write(&path, HERMES_LOG).unwrap();

  let cli = FibtraceCli::try_parse_from([
    "fibtrace",
    "time-diff",
    path.to_str().unwrap(),
    "--kind",
    "HERMES",
    "--json",
  ])
  .unwrap();
  let FibtraceCommands::TimeDiff(cmd) = cli.command else {
    panic!("expected time-diff");
  };
  assert_eq!(cmd.kind, TraceKind::Hermes);
  assert_eq!(cmd.baseline, Baseline::FirstEvent);
  cmd.run().unwrap();

  let report: TimeDiffReport = cmd.report().unwrap();
  assert_eq!(report.kind, TraceKind::Hermes);
  assert_eq!(report.diffs, vec![0.0, 15.0]);
  let summary = report.summary.unwrap();
  assert_eq!(summary.count, 2);
  assert_eq!(summary.total, 15.0);
  assert_eq!(summary.max, 15.0);

  let json = serde_json::to_value(&report).unwrap();
  assert_eq!(json["kind"], "HERMES");
  assert_eq!(json["diffs"], serde_json::json!([0.0, 15.0]));
  assert_eq!(json["summary"]["mean"], 7.5);
}

#[test]
fn time_diff_skip_baseline_report() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("trace-hermes.log");
  fs::write(&path, HERMES_LOG).unwrap();

  let cli = FibtraceCli::try_parse_from([
    "fibtrace",
    "time-diff",
    path.to_str().unwrap(),
    "--baseline",
    "skip",
  ])
  .unwrap();
  let FibtraceCommands::TimeDiff(cmd) = cli.command else {
    panic!("expected time-diff");
  };
  assert_eq!(cmd.report().unwrap().diffs, vec![15.0]);
}

#[test]
fn help_shows_about_text() {
  let command = FibtraceCli::command();
  let about = command.get_about().unwrap().to_string();
  assert!(about.contains("Fibonacci"));
}

#[test]
fn transform_writes_output() {
  let dir = tempfile::tempdir().unwrap();
  let input = dir.path().join("trace-hermes.log");
  let output = dir.path().join("hermes-converted.json");
  fs::write(&input, HERMES_LOG).unwrap();

  let cli = FibtraceCli::try_parse_from([
    "fibtrace",
    "transform",
    input.to_str().unwrap(),
    output.to_str().unwrap(),
  ])
  .unwrap();
  let FibtraceCommands::Transform(cmd) = cli.command else {
    panic!("expected transform");
  };
  cmd.run().unwrap();

  let converted = TraceFile::load(&output).unwrap();
  assert_eq!(converted.events(TraceKind::Chrome).unwrap().len(), 4);
}

#[test]
fn transform_missing_input_fails() {
  let dir = tempfile::tempdir().unwrap();
  let cli = FibtraceCli::try_parse_from([
    "fibtrace",
    "transform",
    dir.path().join("missing.log").to_str().unwrap(),
    dir.path().join("out.json").to_str().unwrap(),
  ])
  .unwrap();
  let FibtraceCommands::Transform(cmd) = cli.command else {
    panic!("expected transform");
  };
  let err = cmd.run().unwrap_err();
  assert!(err.to_string().contains("while reading"));
}
