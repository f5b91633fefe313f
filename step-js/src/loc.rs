use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// A half-open range of offsets into the original source text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn start(&self) -> usize {
    self.0
  }

  pub fn end(&self) -> usize {
    self.1
  }

  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  /// The smallest range covering both `self` and `other`.
  pub fn extend(self, other: Loc) -> Loc {
    Loc(self.0.min(other.0), self.1.max(other.1))
  }
}

impl fmt::Display for Loc {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}, {})", self.0, self.1)
  }
}
