mod common;

use common::parse;
use step_js::CompletionType;
use step_js::EvalError;
use step_js::Loc;
use step_js::Session;
use step_js::StepKind;
use step_js::Stepper;
use step_js::Value;
use step_js::VisualizerError;

#[test]
fn steps_arrive_in_evaluation_order() {
  let mut stepper = Stepper::spawn(parse("1 + 2 + 3;\n'a' + 'b';"));
  let mut kinds = Vec::new();
  while let Some(pending) = stepper.next_step() {
    assert_eq!(pending.step().index, kinds.len());
    kinds.push(pending.step().kind.clone());
    pending.acknowledge();
  }
  assert_eq!(
    kinds,
    vec![
      StepKind::ReplaceRange {
        range: Loc(0, 5),
        text: "3".into()
      },
      StepKind::ReplaceRange {
        range: Loc(0, 9),
        text: "6".into()
      },
      StepKind::StringConcatenate {
        left: Loc(11, 14),
        right: Loc(17, 20)
      },
    ]
  );
  let completion = stepper.finish().unwrap();
  assert_eq!(completion.typ, CompletionType::Normal);
  assert_eq!(completion.value, Some(Value::String("ab".into())));
}

#[test]
fn evaluator_waits_for_each_acknowledgement() {
  let mut stepper = Stepper::spawn(parse("1 + 2 + 3"));
  let first = stepper.next_step().unwrap();
  assert_eq!(first.step().index, 0);
  // The evaluator is blocked on the first step, so nothing else can be queued yet.
  assert!(stepper.try_next_step().is_none());
  first.acknowledge();
  let second = stepper.next_step().unwrap();
  assert_eq!(second.step().index, 1);
  second.acknowledge();
  assert!(stepper.next_step().is_none());
  assert_eq!(
    stepper.finish().unwrap().value,
    Some(Value::Number(6.0))
  );
}

#[test]
fn steps_can_be_applied_to_a_session() {
  let source = "'a' + 1 + 'b'";
  let mut session = Session::new(source);
  let mut stepper = Stepper::spawn(parse(source));
  while let Some(pending) = stepper.next_step() {
    pending.step().apply_to(&mut session).unwrap();
    pending.acknowledge();
  }
  stepper.finish().unwrap();
  assert_eq!(session.frames(), ["'a1' + 'b'", "'a1b'"]);
}

#[test]
fn dropping_a_step_disconnects_the_evaluator() {
  let mut stepper = Stepper::spawn(parse("1 + 2 + 3"));
  drop(stepper.next_step().unwrap());
  match stepper.finish() {
    Err(EvalError::Visualizer(VisualizerError::Disconnected)) => {}
    other => panic!("expected a disconnected visualizer, got {other:?}"),
  }
}

#[test]
fn finishing_early_stops_the_evaluation() {
  let stepper = Stepper::spawn(parse("1 + 2"));
  match stepper.finish() {
    Err(EvalError::Visualizer(VisualizerError::Disconnected)) => {}
    other => panic!("expected a disconnected visualizer, got {other:?}"),
  }
}

#[test]
fn evaluation_errors_are_returned_by_finish() {
  let mut stepper = Stepper::spawn(parse("1 * 2"));
  assert!(stepper.next_step().is_none());
  match stepper.finish() {
    Err(EvalError::UnsupportedOperator(_)) => {}
    other => panic!("expected an unsupported operator, got {other:?}"),
  }
}
