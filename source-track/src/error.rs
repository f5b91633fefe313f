/// Errors produced by [`crate::SourcePositionTracker`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackError {
  /// An offset into the original text was outside of the position table.
  #[error("original offset {offset} is out of range (original length {len})")]
  OffsetOutOfRange { offset: usize, len: usize },

  /// An offset into the live text was past its end.
  #[error("live offset {offset} is out of range (live length {len})")]
  LiveOffsetOutOfRange { offset: usize, len: usize },

  /// A range whose start comes after its end.
  #[error("invalid range {start}..{end}")]
  InvalidRange { start: usize, end: usize },
}
