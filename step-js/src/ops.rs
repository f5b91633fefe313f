//! Abstract operations: type conversion and reference dereferencing.
//!
//! Every operation keeps the source range of its input, so a coerced value still points at the
//! source text that produced it.

use crate::completion::Abrupt;
use crate::completion::CompletionResult;
use crate::error::EvalError;
use crate::num::number_to_string;
use crate::num::string_to_number;
use crate::value::SpannedValue;
use crate::value::SpecValue;
use crate::value::Value;

/// `ToPrimitive(input)`. Every value except an Object is already primitive.
pub fn to_primitive(input: SpannedValue) -> CompletionResult<SpannedValue> {
  match input.value {
    Value::Object(_) => Err(EvalError::ObjectsUnsupported.into()),
    _ => Ok(input),
  }
}

/// `ToNumber(argument)`.
pub fn to_number(argument: SpannedValue) -> CompletionResult<SpannedValue> {
  // An Object is converted through ToPrimitive first; anything else already is primitive.
  let argument = to_primitive(argument)?;
  let n = match &argument.value {
    Value::Undefined => f64::NAN,
    Value::Null => 0.0,
    Value::Bool(b) => {
      if *b {
        1.0
      } else {
        0.0
      }
    }
    Value::Number(n) => *n,
    Value::String(s) => string_to_number(s),
    Value::Symbol(_) => {
      return Err(EvalError::TypeError("Cannot convert a Symbol value to a number").into())
    }
    Value::Object(_) => {
      return Err(EvalError::InvariantViolation("ToPrimitive returned an Object").into())
    }
  };
  Ok(argument.with_value(Value::Number(n)))
}

/// `ToString(argument)`.
pub fn to_string(argument: SpannedValue) -> CompletionResult<SpannedValue> {
  // An Object is converted through ToPrimitive first; anything else already is primitive.
  let argument = to_primitive(argument)?;
  let s = match &argument.value {
    Value::Undefined => "undefined".to_string(),
    Value::Null => "null".to_string(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => number_to_string(*n),
    Value::String(s) => s.clone(),
    Value::Symbol(_) => {
      return Err(EvalError::TypeError("Cannot convert a Symbol value to a string").into())
    }
    Value::Object(_) => {
      return Err(EvalError::InvariantViolation("ToPrimitive returned an Object").into())
    }
  };
  Ok(argument.with_value(Value::String(s)))
}

/// `GetValue(V)`.
///
/// A completion is unwrapped first, so an abrupt one comes back as [`Abrupt::Completion`]
/// untouched. Only unresolvable references can be dereferenced meaningfully; every other reference
/// needs an object model or environment records, neither of which exist.
pub fn get_value(v: SpecValue) -> CompletionResult<SpannedValue> {
  let v = match v {
    SpecValue::Completion(c) => return c.return_if_abrupt(),
    SpecValue::List(_) => {
      return Err(Abrupt::Fatal(EvalError::InvariantViolation(
        "GetValue called on a List",
      )))
    }
    SpecValue::Value(v) => return Ok(v),
    SpecValue::Reference(r) => r,
  };
  if v.is_unresolvable_reference() {
    return Err(EvalError::ReferenceError(v.name_for_display()).into());
  }
  if v.has_primitive_base() {
    return Err(EvalError::Unimplemented("ToObject").into());
  }
  if v.is_property_reference() {
    return Err(EvalError::Unimplemented("[[Get]]").into());
  }
  Err(EvalError::Unimplemented("environment records").into())
}
