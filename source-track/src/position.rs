use serde::Deserialize;
use serde::Serialize;

/// A location in some text: a 0-based `offset`, and the 0-based `line` and `column` it falls on.
///
/// A `Position` does not know which text it was computed against. Callers must keep track of
/// whether it refers to the original source or to the live buffer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Position {
  pub offset: usize,
  pub line: usize,
  pub column: usize,
}

impl Position {
  pub const fn new(offset: usize, line: usize, column: usize) -> Position {
    Position {
      offset,
      line,
      column,
    }
  }

  /// The position right after `c`, if `c` is found at this position.
  pub(crate) fn advance(self, c: char) -> Position {
    if c == '\n' {
      Position::new(self.offset + 1, self.line + 1, 0)
    } else {
      Position::new(self.offset + 1, self.line, self.column + 1)
    }
  }
}

/// Computes the position of `offset` by scanning `text` from the start.
///
/// Returns `None` if `offset` is past the end of `text`. The end of the text itself is a valid
/// offset.
pub fn position_at(text: &str, offset: usize) -> Option<Position> {
  let mut pos = Position::default();
  let mut chars = text.chars();
  while pos.offset < offset {
    pos = pos.advance(chars.next()?);
  }
  Some(pos)
}
