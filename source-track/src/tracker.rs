use crate::error::TrackError;
use crate::modification::Modification;
use crate::position::Position;
use tracing::trace;

/// Translates offsets in an original text into positions inside a live, edited copy of it.
#[derive(Clone, Debug)]
pub struct SourcePositionTracker {
  live: Vec<char>,
  // Indexed by original offset, including the offset right after the last char.
  original_positions: Vec<Position>,
  modifications: Vec<Modification>,
}

impl SourcePositionTracker {
  pub fn new(source: &str) -> SourcePositionTracker {
    let live: Vec<char> = source.chars().collect();
    let mut original_positions = Vec::with_capacity(live.len() + 1);
    let mut pos = Position::default();
    original_positions.push(pos);
    for &c in &live {
      pos = pos.advance(c);
      original_positions.push(pos);
    }
    SourcePositionTracker {
      live,
      original_positions,
      modifications: Vec::new(),
    }
  }

  /// The number of addressable original offsets: the original text's length plus one, since the
  /// end of the text can be looked up too.
  pub fn original_len(&self) -> usize {
    self.original_positions.len()
  }

  pub fn live_len(&self) -> usize {
    self.live.len()
  }

  pub fn live_text(&self) -> String {
    self.live.iter().collect()
  }

  /// The live text between two live offsets.
  pub fn live_slice(&self, start: usize, end: usize) -> Result<String, TrackError> {
    self.check_live_range(start, end)?;
    Ok(self.live[start..end].iter().collect())
  }

  pub fn modifications(&self) -> &[Modification] {
    &self.modifications
  }

  /// Looks up `offset` in the original text and translates it into the live text by replaying
  /// every recorded modification in order.
  pub fn from_original_offset(&self, offset: usize) -> Result<Position, TrackError> {
    let original = *self
      .original_positions
      .get(offset)
      .ok_or(TrackError::OffsetOutOfRange {
        offset,
        len: self.original_len(),
      })?;
    Ok(
      self
        .modifications
        .iter()
        .fold(original, |pos, modification| modification.apply(pos)),
    )
  }

  /// Computes the position of a live offset by scanning the live text.
  pub fn live_position(&self, offset: usize) -> Result<Position, TrackError> {
    if offset > self.live.len() {
      return Err(TrackError::LiveOffsetOutOfRange {
        offset,
        len: self.live.len(),
      });
    }
    Ok(
      self.live[..offset]
        .iter()
        .fold(Position::default(), |pos, &c| pos.advance(c)),
    )
  }

  pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), TrackError> {
    let start = self.live_position(offset)?;
    trace!(offset, len = text.chars().count(), "insert");
    self.live.splice(offset..offset, text.chars());
    self.modifications.push(Modification::insert(start, text));
    Ok(())
  }

  /// Removes the live text between `start` and `end`, returning it.
  pub fn remove(&mut self, start: usize, end: usize) -> Result<String, TrackError> {
    self.check_live_range(start, end)?;
    let start_pos = self.live_position(start)?;
    let removed: String = self.live.drain(start..end).collect();
    trace!(start, end, "remove");
    self
      .modifications
      .push(Modification::remove(start_pos, removed.clone()));
    Ok(removed)
  }

  fn check_live_range(&self, start: usize, end: usize) -> Result<(), TrackError> {
    if start > end {
      return Err(TrackError::InvalidRange { start, end });
    }
    if end > self.live.len() {
      return Err(TrackError::LiveOffsetOutOfRange {
        offset: end,
        len: self.live.len(),
      });
    }
    Ok(())
  }
}
