use crate::loc::Loc;
use crate::value::JsSymbol;
use crate::value::Type;
use crate::value::Value;

/// The `[[ReferencedName]]` of a [`Reference`].
#[derive(Clone, Debug, PartialEq)]
pub enum ReferencedName {
  String(String),
  Symbol(JsSymbol),
}

/// ECMA-262 Reference specification type.
///
/// There are no environment records, so the base is always a language value; `undefined` marks an
/// unresolvable reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Reference {
  pub base: Value,
  pub referenced_name: ReferencedName,
  pub strict: bool,
  pub loc: Option<Loc>,
}

impl Reference {
  pub fn new(base: Value, referenced_name: ReferencedName, strict: bool) -> Reference {
    Reference {
      base,
      referenced_name,
      strict,
      loc: None,
    }
  }

  /// `GetBase(V)`.
  pub fn base(&self) -> &Value {
    &self.base
  }

  /// `GetReferencedName(V)`.
  pub fn referenced_name(&self) -> &ReferencedName {
    &self.referenced_name
  }

  /// `IsStrictReference(V)`.
  pub fn is_strict_reference(&self) -> bool {
    self.strict
  }

  /// `HasPrimitiveBase(V)`.
  pub fn has_primitive_base(&self) -> bool {
    matches!(
      self.base.type_of(),
      Type::Boolean | Type::String | Type::Symbol | Type::Number
    )
  }

  /// `IsPropertyReference(V)`.
  pub fn is_property_reference(&self) -> bool {
    self.has_primitive_base() || self.base.type_of() == Type::Object
  }

  /// `IsUnresolvableReference(V)`.
  pub fn is_unresolvable_reference(&self) -> bool {
    self.base.type_of() == Type::Undefined
  }

  pub(crate) fn name_for_display(&self) -> String {
    match &self.referenced_name {
      ReferencedName::String(s) => s.clone(),
      ReferencedName::Symbol(sym) => format!("Symbol({})", sym.description().unwrap_or("")),
    }
  }
}
