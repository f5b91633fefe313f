use crate::completion::Completion;
use crate::error::EvalError;
use crate::loc::Loc;
use crate::reference::Reference;
use derive_more::derive::From;
use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// The type of a value, as returned by the `Type(x)` notation of ECMA-262.
///
/// Covers both the ECMAScript language types and the specification types the evaluator uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Type {
  Undefined,
  Null,
  Boolean,
  String,
  Symbol,
  Number,
  Object,
  List,
  Completion,
  Reference,
}

impl fmt::Display for Type {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Type::Undefined => "Undefined",
      Type::Null => "Null",
      Type::Boolean => "Boolean",
      Type::String => "String",
      Type::Symbol => "Symbol",
      Type::Number => "Number",
      Type::Object => "Object",
      Type::List => "List",
      Type::Completion => "Completion",
      Type::Reference => "Reference",
    };
    f.write_str(name)
  }
}

/// An ECMAScript language value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  Undefined,
  Null,
  Bool(bool),
  String(String),
  Symbol(JsSymbol),
  /// An IEEE-754 double; `+0`, `-0` and `NaN` keep their IEEE-754 meaning.
  Number(f64),
  Object(JsObject),
}

impl Value {
  pub fn type_of(&self) -> Type {
    match self {
      Value::Undefined => Type::Undefined,
      Value::Null => Type::Null,
      Value::Bool(_) => Type::Boolean,
      Value::String(_) => Type::String,
      Value::Symbol(_) => Type::Symbol,
      Value::Number(_) => Type::Number,
      Value::Object(_) => Type::Object,
    }
  }

  /// ECMAScript `SameValue(x, y)`.
  ///
  /// Unlike `==`/`===` on Numbers, `NaN` is the same as `NaN`, and `+0` and `-0` are distinct.
  pub fn same_value(&self, other: &Value) -> bool {
    match (self, other) {
      (Value::Number(a), Value::Number(b)) => {
        if a.is_nan() && b.is_nan() {
          return true;
        }
        if *a == 0.0 && *b == 0.0 {
          return a.to_bits() == b.to_bits();
        }
        a == b
      }
      (a, b) => a == b,
    }
  }
}

/// `Number::equal(x, y)`: `NaN` is never equal to anything, and `+0` equals `-0`.
pub fn number_equal(x: f64, y: f64) -> bool {
  x == y
}

/// A Symbol value. Symbols compare by identity.
#[derive(Clone, Debug)]
pub struct JsSymbol {
  id: u64,
  description: Option<String>,
}

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(0);

impl JsSymbol {
  pub fn new(description: Option<&str>) -> JsSymbol {
    JsSymbol {
      id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
      description: description.map(str::to_string),
    }
  }

  pub fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }
}

impl PartialEq for JsSymbol {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for JsSymbol {}

/// Placeholder for the Object type.
///
/// There is no object model yet, so no object can be created: [`JsObject::new`] always fails.
#[derive(Clone, Debug, PartialEq)]
pub struct JsObject {
  _unconstructible: (),
}

impl JsObject {
  pub fn new() -> Result<JsObject, EvalError> {
    Err(EvalError::ObjectsUnsupported)
  }
}

/// A language value together with the range of the source that produced it.
///
/// `loc` is `None` for values synthesized by the evaluator rather than read from source.
#[derive(Clone, Debug, PartialEq)]
pub struct SpannedValue {
  pub value: Value,
  pub loc: Option<Loc>,
}

impl SpannedValue {
  pub fn new(value: Value, loc: Loc) -> SpannedValue {
    SpannedValue {
      value,
      loc: Some(loc),
    }
  }

  pub fn synthesized(value: Value) -> SpannedValue {
    SpannedValue { value, loc: None }
  }

  /// Replaces the value, keeping the source range.
  pub fn with_value(&self, value: Value) -> SpannedValue {
    SpannedValue {
      value,
      loc: self.loc,
    }
  }

  pub fn type_of(&self) -> Type {
    self.value.type_of()
  }
}

/// Anything evaluating a node can produce: a language value or a specification type.
#[derive(Clone, Debug, PartialEq, From)]
pub enum SpecValue {
  Value(SpannedValue),
  List(Vec<SpecValue>),
  Completion(Completion),
  Reference(Reference),
}

impl SpecValue {
  pub fn type_of(&self) -> Type {
    match self {
      SpecValue::Value(v) => v.type_of(),
      SpecValue::List(_) => Type::List,
      SpecValue::Completion(_) => Type::Completion,
      SpecValue::Reference(_) => Type::Reference,
    }
  }
}
