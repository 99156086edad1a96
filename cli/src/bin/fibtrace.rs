use anyhow::Result;
use clap::Parser;
use fibtrace_cli::FibtraceCli;

fn main() -> Result<()> {
  FibtraceCli::parse().run()
}
