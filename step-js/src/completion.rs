use crate::error::EvalError;
use crate::loc::Loc;
use crate::value::SpannedValue;
use crate::value::Value;

/// `[[Type]]` of a Completion Record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionType {
  Normal,
  Break,
  Continue,
  Return,
  Throw,
}

/// ECMA-262 Completion Record.
///
/// `value` and `target` are `None` where ECMA-262 says `empty`.
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
  pub typ: CompletionType,
  pub value: Option<Value>,
  pub target: Option<String>,
  pub loc: Option<Loc>,
}

impl Completion {
  pub fn normal(value: SpannedValue) -> Completion {
    Completion {
      typ: CompletionType::Normal,
      value: Some(value.value),
      target: None,
      loc: value.loc,
    }
  }

  pub fn empty(loc: Option<Loc>) -> Completion {
    Completion {
      typ: CompletionType::Normal,
      value: None,
      target: None,
      loc,
    }
  }

  pub fn throw(value: SpannedValue) -> Completion {
    Completion {
      typ: CompletionType::Throw,
      value: Some(value.value),
      target: None,
      loc: value.loc,
    }
  }

  pub fn return_value(value: SpannedValue) -> Completion {
    Completion {
      typ: CompletionType::Return,
      value: Some(value.value),
      target: None,
      loc: value.loc,
    }
  }

  pub fn break_to(target: Option<String>, loc: Option<Loc>) -> Completion {
    Completion {
      typ: CompletionType::Break,
      value: None,
      target,
      loc,
    }
  }

  pub fn continue_to(target: Option<String>, loc: Option<Loc>) -> Completion {
    Completion {
      typ: CompletionType::Continue,
      value: None,
      target,
      loc,
    }
  }

  pub fn is_abrupt(&self) -> bool {
    self.typ != CompletionType::Normal
  }

  /// The completion's value with its source range, if it has one.
  pub fn spanned_value(&self) -> Option<SpannedValue> {
    self.value.clone().map(|value| SpannedValue {
      value,
      loc: self.loc,
    })
  }

  /// `ReturnIfAbrupt(completion)`: hands an abrupt completion back to the caller as an
  /// [`Abrupt::Completion`], otherwise unwraps the normal completion's value.
  pub fn return_if_abrupt(self) -> CompletionResult<SpannedValue> {
    if self.is_abrupt() {
      return Err(Abrupt::Completion(self));
    }
    self
      .spanned_value()
      .ok_or(Abrupt::Fatal(EvalError::InvariantViolation(
        "normal completion has an empty value",
      )))
  }

  /// The `!` shorthand: the completion must be normal and must carry a value.
  pub fn assert_not_abrupt(self) -> Result<SpannedValue, EvalError> {
    if self.is_abrupt() {
      return Err(EvalError::InvariantViolation(
        "abrupt completion where none was expected",
      ));
    }
    self.spanned_value().ok_or(EvalError::InvariantViolation(
      "normal completion has an empty value",
    ))
  }

  /// `UpdateEmpty(completion, value)`.
  pub fn update_empty(self, value: Value) -> Result<Completion, EvalError> {
    if matches!(self.typ, CompletionType::Return | CompletionType::Throw) && self.value.is_none() {
      return Err(EvalError::InvariantViolation(
        "return or throw completion has an empty value",
      ));
    }
    if self.value.is_some() {
      return Ok(self);
    }
    Ok(Completion {
      value: Some(value),
      ..self
    })
  }
}

/// Why a computation stopped before producing its value.
///
/// `Completion` carries an abrupt completion outward to the nearest caller that handles it (at
/// the moment, only the top of the evaluation). `Fatal` ends the evaluation.
#[derive(Clone, Debug)]
pub enum Abrupt {
  Completion(Completion),
  Fatal(EvalError),
}

impl From<EvalError> for Abrupt {
  fn from(value: EvalError) -> Self {
    Abrupt::Fatal(value)
  }
}

/// Result of a step that may complete abruptly; `?` plays the part of `ReturnIfAbrupt`.
pub type CompletionResult<T> = Result<T, Abrupt>;

#[cfg(test)]
mod tests {
  use super::Abrupt;
  use super::Completion;
  use super::CompletionType;
  use crate::error::EvalError;
  use crate::loc::Loc;
  use crate::value::SpannedValue;
  use crate::value::Value;

  #[test]
  fn update_empty_fills_only_empty_values() {
    let filled = Completion::empty(Some(Loc(0, 3)))
      .update_empty(Value::Bool(true))
      .unwrap();
    assert_eq!(filled.typ, CompletionType::Normal);
    assert_eq!(filled.value, Some(Value::Bool(true)));
    assert_eq!(filled.loc, Some(Loc(0, 3)));

    let brk = Completion::break_to(Some("outer".to_string()), None)
      .update_empty(Value::Null)
      .unwrap();
    assert_eq!(brk.typ, CompletionType::Break);
    assert_eq!(brk.target.as_deref(), Some("outer"));
    assert_eq!(brk.value, Some(Value::Null));

    let kept = Completion::normal(SpannedValue::synthesized(Value::Number(1.0)))
      .update_empty(Value::Number(2.0))
      .unwrap();
    assert_eq!(kept.value, Some(Value::Number(1.0)));
  }

  #[test]
  fn update_empty_rejects_empty_throw() {
    let bad = Completion {
      typ: CompletionType::Throw,
      value: None,
      target: None,
      loc: None,
    };
    assert!(matches!(
      bad.update_empty(Value::Undefined),
      Err(EvalError::InvariantViolation(_))
    ));
  }

  #[test]
  fn return_if_abrupt_propagates_abrupt_completions() {
    let thrown = Completion::throw(SpannedValue::new(Value::String("boom".into()), Loc(1, 2)));
    match thrown.clone().return_if_abrupt() {
      Err(Abrupt::Completion(c)) => assert_eq!(c, thrown),
      other => panic!("expected abrupt completion, got {other:?}"),
    }

    let value = SpannedValue::new(Value::Number(3.0), Loc(0, 5));
    assert_eq!(
      Completion::normal(value.clone()).return_if_abrupt().unwrap(),
      value
    );

    assert!(matches!(
      Completion::empty(None).return_if_abrupt(),
      Err(Abrupt::Fatal(EvalError::InvariantViolation(_)))
    ));
  }

  #[test]
  fn assert_not_abrupt_rejects_abrupt_completions() {
    let ret = Completion::return_value(SpannedValue::synthesized(Value::Undefined));
    assert!(ret.is_abrupt());
    assert!(matches!(
      ret.assert_not_abrupt(),
      Err(EvalError::InvariantViolation(_))
    ));
    assert!(Completion::continue_to(None, None).is_abrupt());
  }
}
