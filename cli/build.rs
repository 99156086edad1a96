use anyhow::Result;
use vergen_git2::{BuildBuilder, Emitter, Git2Builder};

// Emits VERGEN_GIT_SHA, VERGEN_GIT_COMMIT_DATE and VERGEN_BUILD_TIMESTAMP for
// `fibtrace --version`. Outside a git checkout the git values fall back to
// vergen's placeholder.
fn main() -> Result<()> {
  let build = BuildBuilder::default().build_timestamp(true).build()?;
  let git = Git2Builder::default()
    .sha(true)
    .commit_date(true)
    .build()?;

  Emitter::default()
    .add_instructions(&build)?
    .add_instructions(&git)?
    .emit()?;
  Ok(())
}
