use crate::ast::Node;
use crate::completion::Completion;
use crate::error::EvalError;
use crate::eval::evaluate;
use crate::loc::Loc;
use crate::visualizer::Visualizer;
use crate::visualizer::VisualizerError;
use serde::Deserialize;
use source_track::Position;
use source_track::SourcePositionTracker;
use tracing::trace;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionOptions {
  /// Reject steps whose ranges cross a line break.
  pub single_line: bool,
  /// Quote used for a concatenation where neither operand is a quoted literal.
  pub default_quote: char,
}

impl Default for SessionOptions {
  fn default() -> Self {
    SessionOptions {
      single_line: true,
      default_quote: '\'',
    }
  }
}

/// Applies evaluation steps to a live copy of the source text.
///
/// Step ranges are always in original offsets; the session resolves them through its
/// [`SourcePositionTracker`] before every edit, so earlier edits never invalidate later ranges.
#[derive(Clone, Debug)]
pub struct Session {
  tracker: SourcePositionTracker,
  options: SessionOptions,
  frames: Vec<String>,
}

impl Session {
  pub fn new(source: &str) -> Session {
    Session::with_options(source, SessionOptions::default())
  }

  pub fn with_options(source: &str, options: SessionOptions) -> Session {
    Session {
      tracker: SourcePositionTracker::new(source),
      options,
      frames: Vec::new(),
    }
  }

  /// Evaluates `node`, which must have been parsed from this session's source.
  pub fn evaluate(&mut self, node: &Node) -> Result<Completion, EvalError> {
    evaluate(node, self)
  }

  pub fn live_text(&self) -> String {
    self.tracker.live_text()
  }

  /// The live text after each applied step, in order.
  pub fn frames(&self) -> &[String] {
    &self.frames
  }

  pub fn tracker(&self) -> &SourcePositionTracker {
    &self.tracker
  }

  pub fn options(&self) -> &SessionOptions {
    &self.options
  }

  fn resolve(&self, range: Loc) -> Result<(Position, Position), VisualizerError> {
    let start = self.tracker.from_original_offset(range.start())?;
    let end = self.tracker.from_original_offset(range.end())?;
    trace!(%range, live_start = start.offset, live_end = end.offset, "resolved range");
    Ok((start, end))
  }

  fn check_single_line(&self, start: Position, end: Position) -> Result<(), VisualizerError> {
    if self.options.single_line && start.line != end.line {
      return Err(VisualizerError::SpansLines {
        start_line: start.line,
        end_line: end.line,
      });
    }
    Ok(())
  }

  // Inserts `text` at `start` and then removes the old `start..end` after it. Original offsets that
  // mapped to `end` now map to the end of `text`, which plain remove-then-insert would lose.
  fn replace_live(&mut self, start: usize, end: usize, text: &str) -> Result<(), VisualizerError> {
    let len = text.chars().count();
    if len > 0 {
      self.tracker.insert(start, text)?;
    }
    if end > start {
      self.tracker.remove(start + len, end + len)?;
    }
    Ok(())
  }

  fn push_frame(&mut self) {
    self.frames.push(self.tracker.live_text());
  }
}

fn quote_of(text: &str) -> Option<char> {
  let mut chars = text.chars();
  let first = chars.next()?;
  let last = chars.next_back()?;
  (matches!(first, '\'' | '"') && first == last).then_some(first)
}

// The text of an operand without its quotes.
fn contents(text: &str, quote: Option<char>) -> &str {
  match quote {
    Some(_) => &text[1..text.len() - 1],
    None => text,
  }
}

// Char indices of every `quote` in `content` that is not already escaped.
fn unescaped_quotes(content: &str, quote: char) -> Vec<usize> {
  let mut found = Vec::new();
  let mut escaped = false;
  for (i, c) in content.chars().enumerate() {
    if escaped {
      escaped = false;
    } else if c == '\\' {
      escaped = true;
    } else if c == quote {
      found.push(i);
    }
  }
  found
}

fn escape_quotes(content: &str, quote: char) -> String {
  let at = unescaped_quotes(content, quote);
  let mut escaped = String::with_capacity(content.len() + at.len());
  for (i, c) in content.chars().enumerate() {
    if at.contains(&i) {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}

/// Finds the parens wrapped around the two operands of a concatenation, walking outwards from the
/// text between them. Each `)` before the `+` must close a `(` before the left operand, and each
/// `(` after it must be closed after the right operand. Returns the live span including those
/// parens, or `None` when the text between the operands is anything else.
fn enclosing_parens(
  live: &[char],
  left_start: usize,
  between: std::ops::Range<usize>,
  right_end: usize,
) -> Option<(usize, usize)> {
  let mut closing = 0;
  let mut opening = 0;
  let mut past_operator = false;
  for &c in live.get(between)? {
    match c {
      ')' if !past_operator => closing += 1,
      '+' if !past_operator => past_operator = true,
      '(' => {
        past_operator = true;
        opening += 1;
      }
      c if c.is_whitespace() => {}
      _ => return None,
    }
  }

  let mut outer_start = left_start;
  while closing > 0 {
    outer_start = outer_start.checked_sub(1)?;
    match live[outer_start] {
      '(' => closing -= 1,
      c if c.is_whitespace() => {}
      _ => return None,
    }
  }
  let mut outer_end = right_end;
  while opening > 0 {
    match *live.get(outer_end)? {
      ')' => opening -= 1,
      c if c.is_whitespace() => {}
      _ => return None,
    }
    outer_end += 1;
  }
  Some((outer_start, outer_end))
}

impl Visualizer for Session {
  fn replace_range(&mut self, range: Loc, text: &str) -> Result<(), VisualizerError> {
    let (start, end) = self.resolve(range)?;
    self.check_single_line(start, end)?;
    self.replace_live(start.offset, end.offset, text)?;
    self.push_frame();
    Ok(())
  }

  fn string_concatenate(&mut self, left: Loc, right: Loc) -> Result<(), VisualizerError> {
    let (left_start, left_end) = self.resolve(left)?;
    let (right_start, right_end) = self.resolve(right)?;
    self.check_single_line(left_start, right_end)?;

    let left_text = self
      .tracker
      .live_slice(left_start.offset, left_end.offset)?;
    let right_text = self
      .tracker
      .live_slice(right_start.offset, right_end.offset)?;
    let left_quote = quote_of(&left_text);
    let right_quote = quote_of(&right_text);
    let quote = left_quote
      .or(right_quote)
      .unwrap_or(self.options.default_quote);
    // Only a right operand quoted differently can hold an unescaped `quote`.
    let escapes = match right_quote {
      Some(q) if q != quote => unescaped_quotes(contents(&right_text, right_quote), quote),
      _ => Vec::new(),
    };

    let live: Vec<char> = self.tracker.live_text().chars().collect();
    let Some((outer_start, outer_end)) = enclosing_parens(
      &live,
      left_start.offset,
      left_end.offset..right_start.offset,
      right_end.offset,
    ) else {
      trace!(%left, %right, "operands are not a plain sum; replacing both");
      let merged = format!(
        "{quote}{}{}{quote}",
        contents(&left_text, left_quote),
        escape_quotes(contents(&right_text, right_quote), quote),
      );
      self.replace_live(left_start.offset, right_end.offset, &merged)?;
      self.push_frame();
      return Ok(());
    };

    // Edits run from right to left, so each one leaves the live offsets before it untouched.
    if outer_end > right_end.offset {
      self.tracker.remove(right_end.offset, outer_end)?;
    }

    // Close the merged literal at the right operand's end.
    match (right_quote, right_text.chars().last()) {
      (Some(q), _) if q == quote => {}
      (Some(_), _) => {
        self.replace_live(right_end.offset - 1, right_end.offset, &quote.to_string())?;
      }
      (None, Some(last)) => {
        self.replace_live(
          right_end.offset - 1,
          right_end.offset,
          &format!("{last}{quote}"),
        )?;
      }
      (None, None) => {
        self.tracker.insert(right_end.offset, &quote.to_string())?;
      }
    }
    for &i in escapes.iter().rev() {
      self.tracker.insert(right_start.offset + 1 + i, "\\")?;
    }

    // Drop everything between the two contents, including the quotes that meet in the middle.
    let gap_start = self.tracker.from_original_offset(left.end())?.offset
      - usize::from(left_quote.is_some());
    let gap_end = self.tracker.from_original_offset(right.start())?.offset
      + usize::from(right_quote.is_some());
    self.tracker.remove(gap_start, gap_end)?;

    if outer_start < left_start.offset {
      self.tracker.remove(outer_start, left_start.offset)?;
    }
    if left_quote.is_none() {
      let start = self.tracker.from_original_offset(left.start())?.offset;
      self.tracker.insert(start, &quote.to_string())?;
    }

    self.push_frame();
    Ok(())
  }
}
