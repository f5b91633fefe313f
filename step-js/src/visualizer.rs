use crate::loc::Loc;
use serde::Deserialize;
use serde::Serialize;
use source_track::TrackError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VisualizerError {
  /// The consumer of a [`crate::Stepper`] went away before acknowledging a step.
  #[error("visualizer disconnected")]
  Disconnected,
  #[error("range spans lines {start_line} to {end_line}; only single-line edits are supported")]
  SpansLines { start_line: usize, end_line: usize },
  #[error(transparent)]
  Track(#[from] TrackError),
}

/// Receives the evaluation steps, one at a time.
///
/// All ranges are in offsets of the original source. Returning `Ok(())` acknowledges the step; the
/// evaluator does not continue until the call returns.
pub trait Visualizer {
  /// Replace the text of `range` with `text`.
  fn replace_range(&mut self, range: Loc, text: &str) -> Result<(), VisualizerError>;

  /// Merge the string operands at `left` and `right` into one string.
  fn string_concatenate(&mut self, left: Loc, right: Loc) -> Result<(), VisualizerError>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StepKind {
  ReplaceRange { range: Loc, text: String },
  StringConcatenate { left: Loc, right: Loc },
}

/// One evaluation step. `index` counts from zero within an evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
  pub index: usize,
  #[serde(flatten)]
  pub kind: StepKind,
}

impl Step {
  /// Issues this step to `visualizer`.
  pub fn apply_to(&self, visualizer: &mut dyn Visualizer) -> Result<(), VisualizerError> {
    match &self.kind {
      StepKind::ReplaceRange { range, text } => visualizer.replace_range(*range, text),
      StepKind::StringConcatenate { left, right } => visualizer.string_concatenate(*left, *right),
    }
  }
}

/// Acknowledges every step immediately and keeps a transcript.
#[derive(Default, Debug)]
pub struct RecordingVisualizer {
  steps: Vec<Step>,
}

impl RecordingVisualizer {
  pub fn new() -> RecordingVisualizer {
    RecordingVisualizer::default()
  }

  pub fn steps(&self) -> &[Step] {
    &self.steps
  }

  pub fn into_steps(self) -> Vec<Step> {
    self.steps
  }

  fn record(&mut self, kind: StepKind) {
    let index = self.steps.len();
    self.steps.push(Step { index, kind });
  }
}

impl Visualizer for RecordingVisualizer {
  fn replace_range(&mut self, range: Loc, text: &str) -> Result<(), VisualizerError> {
    self.record(StepKind::ReplaceRange {
      range,
      text: text.to_string(),
    });
    Ok(())
  }

  fn string_concatenate(&mut self, left: Loc, right: Loc) -> Result<(), VisualizerError> {
    self.record(StepKind::StringConcatenate { left, right });
    Ok(())
  }
}
