use crate::ast::BinaryOperator;
use crate::visualizer::VisualizerError;

/// Errors that end an evaluation.
///
/// None of these are recoverable: the evaluator stops at the first one and hands it to the caller.
/// Abrupt completions are not errors; they are the evaluation's result.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EvalError {
  /// A node kind the evaluator does not implement.
  #[error("unsupported node kind: {0}")]
  UnsupportedNodeKind(String),

  #[error("unsupported binary operator: {0}")]
  UnsupportedOperator(BinaryOperator),

  /// A literal whose value is not null, a boolean, a number or a string.
  #[error("unsupported literal type: {0}")]
  UnsupportedLiteral(&'static str),

  /// An Object was created or reached; there is no object model.
  #[error("objects are not supported")]
  ObjectsUnsupported,

  #[error("type error: {0}")]
  TypeError(&'static str),

  #[error("reference error: {0} is not defined")]
  ReferenceError(String),

  /// A stubbed codepath, e.g. dereferencing a property reference.
  #[error("unimplemented: {0}")]
  Unimplemented(&'static str),

  /// An internal consistency check failed. This is a bug in the evaluator.
  #[error("invariant violation: {0}")]
  InvariantViolation(&'static str),

  #[error("visualizer failed: {0}")]
  Visualizer(#[from] VisualizerError),

  /// The thread running a [`crate::Stepper`]'s evaluation panicked.
  #[error("evaluator thread panicked")]
  EvaluatorPanicked,
}
