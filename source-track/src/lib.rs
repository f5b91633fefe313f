//! Position tracking for text that is edited after it was parsed.
//!
//! A [`SourcePositionTracker`] is built once from the original source text. It owns a *live* copy
//! of that text which is mutated with [`SourcePositionTracker::insert`] and
//! [`SourcePositionTracker::remove`], and an append-only log of the [`Modification`]s those calls
//! made. Offsets computed against the original text (e.g. AST locations) can then be translated
//! into [`Position`]s inside the live text with [`SourcePositionTracker::from_original_offset`].
//!
//! # Scaling
//!
//! Every lookup replays the whole modification log, so a lookup costs O(edits). This is fine for
//! the handful of edits a single evaluation session makes; a caller doing many thousands of edits
//! per session should expect lookups to slow down linearly.
//!
//! Offsets, lines and columns are counted in Unicode scalar values (`char`s), and `\n` is the only
//! line terminator.

mod error;
mod modification;
mod position;
mod tracker;

pub use crate::error::TrackError;
pub use crate::modification::Modification;
pub use crate::position::position_at;
pub use crate::position::Position;
pub use crate::tracker::SourcePositionTracker;
