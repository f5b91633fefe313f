use crate::position::Position;
use serde::Deserialize;
use serde::Serialize;

/// One recorded edit of the live text.
///
/// `start` is the position of the edit in the text as it was *before* the edit. Applying a
/// modification to a position in that text yields the corresponding position in the text as it is
/// *after* the edit.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Modification {
  Insert { start: Position, inserted: String },
  Remove { start: Position, removed: String },
}

impl Modification {
  pub fn insert(start: Position, inserted: impl Into<String>) -> Modification {
    Modification::Insert {
      start,
      inserted: inserted.into(),
    }
  }

  pub fn remove(start: Position, removed: impl Into<String>) -> Modification {
    Modification::Remove {
      start,
      removed: removed.into(),
    }
  }

  pub fn start(&self) -> Position {
    match self {
      Modification::Insert { start, .. } | Modification::Remove { start, .. } => *start,
    }
  }

  /// The modification that undoes this one.
  pub fn inverse(&self) -> Modification {
    match self {
      Modification::Insert { start, inserted } => Modification::remove(*start, inserted.clone()),
      Modification::Remove { start, removed } => Modification::insert(*start, removed.clone()),
    }
  }

  /// Translates `position` across this modification.
  pub fn apply(&self, position: Position) -> Position {
    match self {
      Modification::Insert { start, inserted } => apply_insert(position, *start, inserted),
      Modification::Remove { start, removed } => apply_remove(position, *start, removed),
    }
  }
}

fn apply_insert(position: Position, start: Position, inserted: &str) -> Position {
  // Anything at or before the insertion point stays put.
  if position.offset <= start.offset {
    return position;
  }

  let offset = position.offset + inserted.chars().count();
  let mut line = position.line;
  let mut column = position.column;
  if position.line == start.line {
    // The inserted text pushes the rest of this line along; every line break it contains moves
    // the rest onto a new line, starting at the same distance from the insertion point.
    let column_offset = position.column - start.column;
    for c in inserted.chars() {
      if c == '\n' {
        line += 1;
        column = column_offset;
      } else {
        column += 1;
      }
    }
  } else {
    line += inserted.chars().filter(|&c| c == '\n').count();
  }

  Position::new(offset, line, column)
}

/// The position right after the removed text, in the text before it was removed.
fn remove_end(start: Position, removed: &str) -> Position {
  removed.chars().fold(start, Position::advance)
}

fn apply_remove(position: Position, start: Position, removed: &str) -> Position {
  if position.offset <= start.offset {
    return position;
  }

  let end = remove_end(start, removed);
  // Removed text has no interior positions left.
  if position.offset <= end.offset {
    return start;
  }

  let offset = position.offset - (end.offset - start.offset);
  if position.line == end.line {
    Position::new(offset, start.line, start.column + (position.column - end.column))
  } else {
    Position::new(offset, position.line - (end.line - start.line), position.column)
  }
}

#[cfg(test)]
mod tests {
  use super::Modification;
  use crate::position::Position;

  #[test]
  fn insert_before_position_on_same_line_shifts_column() {
    // "abcd" -> "abXYcd"
    let m = Modification::insert(Position::new(2, 0, 2), "XY");
    assert_eq!(m.apply(Position::new(3, 0, 3)), Position::new(5, 0, 5));
  }

  #[test]
  fn insert_at_position_does_not_shift_it() {
    let m = Modification::insert(Position::new(2, 0, 2), "XY");
    assert_eq!(m.apply(Position::new(2, 0, 2)), Position::new(2, 0, 2));
    assert_eq!(m.apply(Position::new(1, 0, 1)), Position::new(1, 0, 1));
  }

  #[test]
  fn insert_with_line_break_moves_rest_of_line_down() {
    // "abcd" -> "ab\nXcd"
    let m = Modification::insert(Position::new(2, 0, 2), "\nX");
    // 'd' was at column 3, one past 'c'; it is now one past 'c' on the new line.
    assert_eq!(m.apply(Position::new(2, 0, 2)), Position::new(2, 0, 2));
    assert_eq!(m.apply(Position::new(3, 0, 3)), Position::new(5, 1, 2));
  }

  #[test]
  fn insert_on_earlier_line_only_changes_line() {
    // "ab\ncd" -> "aX\nY\nb\ncd"
    let m = Modification::insert(Position::new(1, 0, 1), "X\nY\n");
    assert_eq!(m.apply(Position::new(4, 1, 1)), Position::new(8, 3, 1));
  }

  #[test]
  fn remove_collapses_interior_positions() {
    // "abcdef" -> "aef"
    let start = Position::new(1, 0, 1);
    let m = Modification::remove(start, "bcd");
    assert_eq!(m.apply(Position::new(2, 0, 2)), start);
    assert_eq!(m.apply(Position::new(4, 0, 4)), start);
    assert_eq!(m.apply(Position::new(5, 0, 5)), Position::new(2, 0, 2));
  }

  #[test]
  fn remove_across_lines() {
    // "ab\ncd\nef" -> "a\nef" (removes "b\ncd")
    let m = Modification::remove(Position::new(1, 0, 1), "b\ncd");
    // The end of the removed span collapses onto its start.
    assert_eq!(m.apply(Position::new(5, 1, 2)), Position::new(1, 0, 1));
    assert_eq!(m.apply(Position::new(6, 2, 0)), Position::new(2, 1, 0));
    assert_eq!(m.apply(Position::new(7, 2, 1)), Position::new(3, 1, 1));
  }

  #[test]
  fn inverse_swaps_kind() {
    let start = Position::new(3, 1, 0);
    assert_eq!(
      Modification::insert(start, "x").inverse(),
      Modification::remove(start, "x")
    );
    assert_eq!(
      Modification::remove(start, "x").inverse(),
      Modification::insert(start, "x")
    );
  }
}
