//! Drives an evaluation one step at a time from another thread.
//!
//! The evaluator runs on its own thread against a [`ChannelVisualizer`]. Every step it issues is
//! sent to the [`Stepper`] together with an acknowledgement sender, and the evaluator blocks until
//! the step is acknowledged, so at most one step is ever in flight.

use crate::ast::Node;
use crate::completion::Completion;
use crate::error::EvalError;
use crate::eval::evaluate;
use crate::loc::Loc;
use crate::visualizer::Step;
use crate::visualizer::StepKind;
use crate::visualizer::Visualizer;
use crate::visualizer::VisualizerError;
use std::sync::mpsc;
use std::thread;
use tracing::trace;

type StepMessage = (Step, mpsc::Sender<()>);

/// A [`Visualizer`] that forwards each step over a channel and waits for its acknowledgement.
pub struct ChannelVisualizer {
  steps: mpsc::Sender<StepMessage>,
  next_index: usize,
}

impl ChannelVisualizer {
  fn issue(&mut self, kind: StepKind) -> Result<(), VisualizerError> {
    let step = Step {
      index: self.next_index,
      kind,
    };
    self.next_index += 1;
    let (ack_tx, ack_rx) = mpsc::channel();
    self
      .steps
      .send((step, ack_tx))
      .map_err(|_| VisualizerError::Disconnected)?;
    ack_rx.recv().map_err(|_| VisualizerError::Disconnected)
  }
}

impl Visualizer for ChannelVisualizer {
  fn replace_range(&mut self, range: Loc, text: &str) -> Result<(), VisualizerError> {
    self.issue(StepKind::ReplaceRange {
      range,
      text: text.to_string(),
    })
  }

  fn string_concatenate(&mut self, left: Loc, right: Loc) -> Result<(), VisualizerError> {
    self.issue(StepKind::StringConcatenate { left, right })
  }
}

/// A step the evaluator is waiting on.
///
/// Dropping it without calling [`PendingStep::acknowledge`] fails the evaluation with
/// [`VisualizerError::Disconnected`].
#[derive(Debug)]
pub struct PendingStep {
  step: Step,
  ack: mpsc::Sender<()>,
}

impl PendingStep {
  pub fn step(&self) -> &Step {
    &self.step
  }

  /// Lets the evaluator continue past this step.
  pub fn acknowledge(self) {
    trace!(step = self.step.index, "acknowledged");
    // The evaluator may already be gone; then there is nobody left to resume.
    let _ = self.ack.send(());
  }
}

pub struct Stepper {
  steps: mpsc::Receiver<StepMessage>,
  evaluation: thread::JoinHandle<Result<Completion, EvalError>>,
}

impl Stepper {
  /// Starts evaluating `program` on a new thread. Nothing past the first step happens until it is
  /// acknowledged.
  pub fn spawn(program: Node) -> Stepper {
    let (steps_tx, steps_rx) = mpsc::channel();
    let evaluation = thread::spawn(move || {
      let mut visualizer = ChannelVisualizer {
        steps: steps_tx,
        next_index: 0,
      };
      evaluate(&program, &mut visualizer)
    });
    Stepper {
      steps: steps_rx,
      evaluation,
    }
  }

  /// Waits for the next step. `None` once the evaluation has ended and every step was taken.
  pub fn next_step(&mut self) -> Option<PendingStep> {
    self
      .steps
      .recv()
      .ok()
      .map(|(step, ack)| PendingStep { step, ack })
  }

  /// The next step if one is already waiting.
  pub fn try_next_step(&mut self) -> Option<PendingStep> {
    self
      .steps
      .try_recv()
      .ok()
      .map(|(step, ack)| PendingStep { step, ack })
  }

  /// Stops taking steps and returns the result of the evaluation.
  ///
  /// An evaluator still waiting to issue a step fails with [`VisualizerError::Disconnected`].
  /// Every [`PendingStep`] taken from this stepper must be acknowledged or dropped first, otherwise
  /// this blocks forever.
  pub fn finish(self) -> Result<Completion, EvalError> {
    let Stepper { steps, evaluation } = self;
    drop(steps);
    evaluation
      .join()
      .map_err(|_| EvalError::EvaluatorPanicked)?
  }
}
