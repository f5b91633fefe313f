//! Step-by-step evaluation of small JavaScript programs.
//!
//! The evaluator follows ECMA-262's value, coercion and completion semantics for literals,
//! the `+` operator, expression statements and programs. Each reduction it performs is issued to a
//! [`Visualizer`] as a [`Step`] that rewrites the source text:
//! - `1 + 2` becomes a *replace range* of the whole expression with `3`.
//! - `'a' + 'b'` becomes a *string concatenate* of the two operand ranges.
//!
//! The evaluator waits for every step to be acknowledged before doing anything else, so steps are
//! totally ordered and at most one is in flight. Ways to drive it:
//! - [`evaluate`] with any [`Visualizer`], e.g. a [`RecordingVisualizer`].
//! - A [`Session`], which applies every step to a live copy of the source, using a
//!   [`source_track::SourcePositionTracker`] to keep original ranges valid across edits.
//! - A [`Stepper`], which runs the evaluation on another thread and hands out steps one at a time.
//!
//! Every AST node kind other than `Program`, `ExpressionStatement`, `BinaryExpression` with `+`
//! and `Literal` is rejected with [`EvalError::UnsupportedNodeKind`]. There is no object model:
//! reaching an Object fails with [`EvalError::ObjectsUnsupported`].

pub mod ast;
mod completion;
mod error;
mod eval;
mod loc;
pub mod num;
pub mod ops;
mod reference;
mod session;
mod stepper;
mod value;
mod visualizer;

pub use crate::completion::Abrupt;
pub use crate::completion::Completion;
pub use crate::completion::CompletionResult;
pub use crate::completion::CompletionType;
pub use crate::error::EvalError;
pub use crate::eval::evaluate;
pub use crate::loc::Loc;
pub use crate::reference::Reference;
pub use crate::reference::ReferencedName;
pub use crate::session::Session;
pub use crate::session::SessionOptions;
pub use crate::stepper::ChannelVisualizer;
pub use crate::stepper::PendingStep;
pub use crate::stepper::Stepper;
pub use crate::value::number_equal;
pub use crate::value::JsObject;
pub use crate::value::JsSymbol;
pub use crate::value::SpannedValue;
pub use crate::value::SpecValue;
pub use crate::value::Type;
pub use crate::value::Value;
pub use crate::visualizer::RecordingVisualizer;
pub use crate::visualizer::Step;
pub use crate::visualizer::StepKind;
pub use crate::visualizer::Visualizer;
pub use crate::visualizer::VisualizerError;
