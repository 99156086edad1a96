use crate::trace::Baseline;

#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratorOpts {
  max_index: Option<u64>,
}

impl GeneratorOpts {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_options(mut self, opts: impl IntoIterator<Item = impl FnOnce(&mut Self)>) -> Self {
    for opt in opts {
      opt(&mut self);
    }
    self
  }

  pub fn max_index(&self) -> Option<u64> {
    self.max_index
  }
}

/// Reject indices above `value`.
pub fn with_max_index(value: u64) -> impl FnOnce(&mut GeneratorOpts) {
  move |opts: &mut GeneratorOpts| {
    opts.max_index = Some(value);
  }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeDiffOpts {
  baseline: Baseline,
}

impl TimeDiffOpts {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_options(mut self, opts: impl IntoIterator<Item = impl FnOnce(&mut Self)>) -> Self {
    for opt in opts {
      opt(&mut self);
    }
    self
  }

  pub fn baseline(&self) -> Baseline {
    self.baseline
  }
}

/// Measure the first event against `value`.
pub fn with_baseline(value: Baseline) -> impl FnOnce(&mut TimeDiffOpts) {
  move |opts: &mut TimeDiffOpts| {
    opts.baseline = value;
  }
}
