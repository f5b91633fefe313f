//! ESTree-shaped syntax tree consumed by the evaluator.
//!
//! Parsing is not done here. A tree is either built directly, or deserialized from the JSON that
//! ESTree parsers such as acorn (`start`/`end` offsets) or esprima (`range: [start, end]`) produce.
//!
//! [`Syntax`] names every ESTree node kind, including the ones the evaluator rejects, so that a
//! `match` over it must say what happens to each of them. Kinds it does not know yet are kept by
//! name in [`Syntax::Unknown`].

use crate::loc::Loc;
use serde::Deserialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "EstreeNode")]
pub struct Node {
  pub loc: Loc,
  pub stx: Box<Syntax>,
}

impl Node {
  pub fn new(loc: Loc, stx: Syntax) -> Node {
    Node {
      loc,
      stx: Box::new(stx),
    }
  }

  pub fn kind(&self) -> &str {
    self.stx.kind()
  }

  /// Deserializes an ESTree JSON document.
  pub fn from_estree_json(json: &str) -> Result<Node, serde_json::Error> {
    serde_json::from_str(json)
  }
}

#[derive(Deserialize)]
struct EstreeNode {
  start: Option<usize>,
  end: Option<usize>,
  range: Option<(usize, usize)>,
  #[serde(flatten)]
  fields: serde_json::Map<String, serde_json::Value>,
}

// The kinds whose children the evaluator reads. Every other kind is taken by name only.
#[derive(Deserialize)]
#[serde(tag = "type")]
enum EstreeSyntax {
  Program(Program),
  ExpressionStatement(ExpressionStatement),
  BinaryExpression(BinaryExpression),
  Literal(Literal),
}

impl From<EstreeSyntax> for Syntax {
  fn from(stx: EstreeSyntax) -> Syntax {
    match stx {
      EstreeSyntax::Program(program) => Syntax::Program(program),
      EstreeSyntax::ExpressionStatement(stmt) => Syntax::ExpressionStatement(stmt),
      EstreeSyntax::BinaryExpression(bin) => Syntax::BinaryExpression(bin),
      EstreeSyntax::Literal(lit) => Syntax::Literal(lit),
    }
  }
}

impl TryFrom<EstreeNode> for Node {
  type Error = String;

  fn try_from(node: EstreeNode) -> Result<Node, String> {
    let kind = match node.fields.get("type") {
      Some(serde_json::Value::String(kind)) => kind.clone(),
      _ => return Err("node has no string type".to_string()),
    };
    let loc = match (node.start, node.end, node.range) {
      (Some(start), Some(end), _) => Loc(start, end),
      (_, _, Some((start, end))) => Loc(start, end),
      _ => return Err(format!("{kind} node has neither start/end nor range")),
    };
    let stx = match kind.as_str() {
      "Program" | "ExpressionStatement" | "BinaryExpression" | "Literal" => {
        serde_json::from_value::<EstreeSyntax>(serde_json::Value::Object(node.fields))
          .map_err(|err| err.to_string())?
          .into()
      }
      other => Syntax::opaque(other),
    };
    Ok(Node::new(loc, stx))
  }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Program {
  pub body: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ExpressionStatement {
  pub expression: Node,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BinaryExpression {
  pub operator: BinaryOperator,
  pub left: Node,
  pub right: Node,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "EstreeLiteral")]
pub struct Literal {
  pub value: LiteralValue,
  pub raw: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
  Null,
  Boolean(bool),
  Number(f64),
  String(String),
  RegExp { pattern: String, flags: String },
  BigInt(String),
}

impl LiteralValue {
  pub fn type_name(&self) -> &'static str {
    match self {
      LiteralValue::Null => "null",
      LiteralValue::Boolean(_) => "boolean",
      LiteralValue::Number(_) => "number",
      LiteralValue::String(_) => "string",
      LiteralValue::RegExp { .. } => "regexp",
      LiteralValue::BigInt(_) => "bigint",
    }
  }
}

#[derive(Deserialize)]
struct EstreeLiteral {
  #[serde(default)]
  value: serde_json::Value,
  raw: Option<String>,
  regex: Option<EstreeRegex>,
  bigint: Option<String>,
}

#[derive(Deserialize)]
struct EstreeRegex {
  pattern: String,
  flags: String,
}

impl TryFrom<EstreeLiteral> for Literal {
  type Error = String;

  fn try_from(lit: EstreeLiteral) -> Result<Literal, String> {
    // RegExp and BigInt values don't survive JSON serialization; the extra fields identify them.
    let value = if let Some(regex) = lit.regex {
      LiteralValue::RegExp {
        pattern: regex.pattern,
        flags: regex.flags,
      }
    } else if let Some(digits) = lit.bigint {
      LiteralValue::BigInt(digits)
    } else {
      match lit.value {
        serde_json::Value::Null => LiteralValue::Null,
        serde_json::Value::Bool(b) => LiteralValue::Boolean(b),
        serde_json::Value::Number(n) => LiteralValue::Number(
          n.as_f64()
            .ok_or_else(|| format!("numeric literal {n} is not representable"))?,
        ),
        serde_json::Value::String(s) => LiteralValue::String(s),
        other => return Err(format!("unrecognized literal value {other}")),
      }
    };
    Ok(Literal {
      value,
      raw: lit.raw,
    })
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum BinaryOperator {
  #[serde(rename = "==")]
  Equality,
  #[serde(rename = "!=")]
  Inequality,
  #[serde(rename = "===")]
  StrictEquality,
  #[serde(rename = "!==")]
  StrictInequality,
  #[serde(rename = "<")]
  LessThan,
  #[serde(rename = "<=")]
  LessThanOrEqual,
  #[serde(rename = ">")]
  GreaterThan,
  #[serde(rename = ">=")]
  GreaterThanOrEqual,
  #[serde(rename = "<<")]
  BitwiseLeftShift,
  #[serde(rename = ">>")]
  BitwiseRightShift,
  #[serde(rename = ">>>")]
  BitwiseUnsignedRightShift,
  #[serde(rename = "+")]
  Addition,
  #[serde(rename = "-")]
  Subtraction,
  #[serde(rename = "*")]
  Multiplication,
  #[serde(rename = "/")]
  Division,
  #[serde(rename = "%")]
  Remainder,
  #[serde(rename = "**")]
  Exponentiation,
  #[serde(rename = "|")]
  BitwiseOr,
  #[serde(rename = "^")]
  BitwiseXor,
  #[serde(rename = "&")]
  BitwiseAnd,
  #[serde(rename = "in")]
  In,
  #[serde(rename = "instanceof")]
  Instanceof,
}

impl BinaryOperator {
  pub fn token(self) -> &'static str {
    match self {
      BinaryOperator::Equality => "==",
      BinaryOperator::Inequality => "!=",
      BinaryOperator::StrictEquality => "===",
      BinaryOperator::StrictInequality => "!==",
      BinaryOperator::LessThan => "<",
      BinaryOperator::LessThanOrEqual => "<=",
      BinaryOperator::GreaterThan => ">",
      BinaryOperator::GreaterThanOrEqual => ">=",
      BinaryOperator::BitwiseLeftShift => "<<",
      BinaryOperator::BitwiseRightShift => ">>",
      BinaryOperator::BitwiseUnsignedRightShift => ">>>",
      BinaryOperator::Addition => "+",
      BinaryOperator::Subtraction => "-",
      BinaryOperator::Multiplication => "*",
      BinaryOperator::Division => "/",
      BinaryOperator::Remainder => "%",
      BinaryOperator::Exponentiation => "**",
      BinaryOperator::BitwiseOr => "|",
      BinaryOperator::BitwiseXor => "^",
      BinaryOperator::BitwiseAnd => "&",
      BinaryOperator::In => "in",
      BinaryOperator::Instanceof => "instanceof",
    }
  }
}

impl fmt::Display for BinaryOperator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.token())
  }
}

/// The syntax of a [`Node`], tagged by its ESTree `type`.
///
/// Only `Program`, `ExpressionStatement`, `BinaryExpression` and `Literal` carry their children;
/// every other kind is recorded by name only, since the evaluator never looks inside them.
#[derive(Clone, Debug, PartialEq)]
pub enum Syntax {
  Program(Program),
  ExpressionStatement(ExpressionStatement),
  BinaryExpression(BinaryExpression),
  Literal(Literal),

  EmptyStatement,
  BlockStatement,
  IfStatement,
  LabeledStatement,
  BreakStatement,
  ContinueStatement,
  WithStatement,
  SwitchStatement,
  ReturnStatement,
  ThrowStatement,
  TryStatement,
  WhileStatement,
  DoWhileStatement,
  ForStatement,
  ForInStatement,
  ForOfStatement,
  DebuggerStatement,
  FunctionDeclaration,
  VariableDeclaration,
  VariableDeclarator,
  ThisExpression,
  ArrayExpression,
  ObjectExpression,
  Property,
  FunctionExpression,
  SequenceExpression,
  UnaryExpression,
  AssignmentExpression,
  UpdateExpression,
  LogicalExpression,
  ConditionalExpression,
  CallExpression,
  NewExpression,
  MemberExpression,
  SwitchCase,
  CatchClause,
  Identifier,
  Super,
  SpreadElement,
  ArrowFunctionExpression,
  YieldExpression,
  AwaitExpression,
  TemplateLiteral,
  TaggedTemplateExpression,
  TemplateElement,
  ObjectPattern,
  ArrayPattern,
  RestElement,
  AssignmentPattern,
  ClassBody,
  MethodDefinition,
  ClassDeclaration,
  ClassExpression,
  MetaProperty,
  ImportDeclaration,
  ImportSpecifier,
  ImportDefaultSpecifier,
  ImportNamespaceSpecifier,
  ExportNamedDeclaration,
  ExportSpecifier,
  ExportDefaultDeclaration,
  ExportAllDeclaration,
  ChainExpression,
  ImportExpression,
  ParenthesizedExpression,
  PrivateIdentifier,
  PropertyDefinition,
  StaticBlock,
  /// A `type` this crate has no variant for, such as a JSX or TypeScript node.
  Unknown(String),
}

impl Syntax {
  /// The ESTree `type` of this node.
  pub fn kind(&self) -> &str {
    match self {
      Syntax::Program(_) => "Program",
      Syntax::ExpressionStatement(_) => "ExpressionStatement",
      Syntax::BinaryExpression(_) => "BinaryExpression",
      Syntax::Literal(_) => "Literal",
      Syntax::EmptyStatement => "EmptyStatement",
      Syntax::BlockStatement => "BlockStatement",
      Syntax::IfStatement => "IfStatement",
      Syntax::LabeledStatement => "LabeledStatement",
      Syntax::BreakStatement => "BreakStatement",
      Syntax::ContinueStatement => "ContinueStatement",
      Syntax::WithStatement => "WithStatement",
      Syntax::SwitchStatement => "SwitchStatement",
      Syntax::ReturnStatement => "ReturnStatement",
      Syntax::ThrowStatement => "ThrowStatement",
      Syntax::TryStatement => "TryStatement",
      Syntax::WhileStatement => "WhileStatement",
      Syntax::DoWhileStatement => "DoWhileStatement",
      Syntax::ForStatement => "ForStatement",
      Syntax::ForInStatement => "ForInStatement",
      Syntax::ForOfStatement => "ForOfStatement",
      Syntax::DebuggerStatement => "DebuggerStatement",
      Syntax::FunctionDeclaration => "FunctionDeclaration",
      Syntax::VariableDeclaration => "VariableDeclaration",
      Syntax::VariableDeclarator => "VariableDeclarator",
      Syntax::ThisExpression => "ThisExpression",
      Syntax::ArrayExpression => "ArrayExpression",
      Syntax::ObjectExpression => "ObjectExpression",
      Syntax::Property => "Property",
      Syntax::FunctionExpression => "FunctionExpression",
      Syntax::SequenceExpression => "SequenceExpression",
      Syntax::UnaryExpression => "UnaryExpression",
      Syntax::AssignmentExpression => "AssignmentExpression",
      Syntax::UpdateExpression => "UpdateExpression",
      Syntax::LogicalExpression => "LogicalExpression",
      Syntax::ConditionalExpression => "ConditionalExpression",
      Syntax::CallExpression => "CallExpression",
      Syntax::NewExpression => "NewExpression",
      Syntax::MemberExpression => "MemberExpression",
      Syntax::SwitchCase => "SwitchCase",
      Syntax::CatchClause => "CatchClause",
      Syntax::Identifier => "Identifier",
      Syntax::Super => "Super",
      Syntax::SpreadElement => "SpreadElement",
      Syntax::ArrowFunctionExpression => "ArrowFunctionExpression",
      Syntax::YieldExpression => "YieldExpression",
      Syntax::AwaitExpression => "AwaitExpression",
      Syntax::TemplateLiteral => "TemplateLiteral",
      Syntax::TaggedTemplateExpression => "TaggedTemplateExpression",
      Syntax::TemplateElement => "TemplateElement",
      Syntax::ObjectPattern => "ObjectPattern",
      Syntax::ArrayPattern => "ArrayPattern",
      Syntax::RestElement => "RestElement",
      Syntax::AssignmentPattern => "AssignmentPattern",
      Syntax::ClassBody => "ClassBody",
      Syntax::MethodDefinition => "MethodDefinition",
      Syntax::ClassDeclaration => "ClassDeclaration",
      Syntax::ClassExpression => "ClassExpression",
      Syntax::MetaProperty => "MetaProperty",
      Syntax::ImportDeclaration => "ImportDeclaration",
      Syntax::ImportSpecifier => "ImportSpecifier",
      Syntax::ImportDefaultSpecifier => "ImportDefaultSpecifier",
      Syntax::ImportNamespaceSpecifier => "ImportNamespaceSpecifier",
      Syntax::ExportNamedDeclaration => "ExportNamedDeclaration",
      Syntax::ExportSpecifier => "ExportSpecifier",
      Syntax::ExportDefaultDeclaration => "ExportDefaultDeclaration",
      Syntax::ExportAllDeclaration => "ExportAllDeclaration",
      Syntax::ChainExpression => "ChainExpression",
      Syntax::ImportExpression => "ImportExpression",
      Syntax::ParenthesizedExpression => "ParenthesizedExpression",
      Syntax::PrivateIdentifier => "PrivateIdentifier",
      Syntax::PropertyDefinition => "PropertyDefinition",
      Syntax::StaticBlock => "StaticBlock",
      Syntax::Unknown(kind) => kind,
    }
  }

  /// The childless syntax for an ESTree `type` other than the four the evaluator reads.
  fn opaque(kind: &str) -> Syntax {
    match kind {
      "EmptyStatement" => Syntax::EmptyStatement,
      "BlockStatement" => Syntax::BlockStatement,
      "IfStatement" => Syntax::IfStatement,
      "LabeledStatement" => Syntax::LabeledStatement,
      "BreakStatement" => Syntax::BreakStatement,
      "ContinueStatement" => Syntax::ContinueStatement,
      "WithStatement" => Syntax::WithStatement,
      "SwitchStatement" => Syntax::SwitchStatement,
      "ReturnStatement" => Syntax::ReturnStatement,
      "ThrowStatement" => Syntax::ThrowStatement,
      "TryStatement" => Syntax::TryStatement,
      "WhileStatement" => Syntax::WhileStatement,
      "DoWhileStatement" => Syntax::DoWhileStatement,
      "ForStatement" => Syntax::ForStatement,
      "ForInStatement" => Syntax::ForInStatement,
      "ForOfStatement" => Syntax::ForOfStatement,
      "DebuggerStatement" => Syntax::DebuggerStatement,
      "FunctionDeclaration" => Syntax::FunctionDeclaration,
      "VariableDeclaration" => Syntax::VariableDeclaration,
      "VariableDeclarator" => Syntax::VariableDeclarator,
      "ThisExpression" => Syntax::ThisExpression,
      "ArrayExpression" => Syntax::ArrayExpression,
      "ObjectExpression" => Syntax::ObjectExpression,
      "Property" => Syntax::Property,
      "FunctionExpression" => Syntax::FunctionExpression,
      "SequenceExpression" => Syntax::SequenceExpression,
      "UnaryExpression" => Syntax::UnaryExpression,
      "AssignmentExpression" => Syntax::AssignmentExpression,
      "UpdateExpression" => Syntax::UpdateExpression,
      "LogicalExpression" => Syntax::LogicalExpression,
      "ConditionalExpression" => Syntax::ConditionalExpression,
      "CallExpression" => Syntax::CallExpression,
      "NewExpression" => Syntax::NewExpression,
      "MemberExpression" => Syntax::MemberExpression,
      "SwitchCase" => Syntax::SwitchCase,
      "CatchClause" => Syntax::CatchClause,
      "Identifier" => Syntax::Identifier,
      "Super" => Syntax::Super,
      "SpreadElement" => Syntax::SpreadElement,
      "ArrowFunctionExpression" => Syntax::ArrowFunctionExpression,
      "YieldExpression" => Syntax::YieldExpression,
      "AwaitExpression" => Syntax::AwaitExpression,
      "TemplateLiteral" => Syntax::TemplateLiteral,
      "TaggedTemplateExpression" => Syntax::TaggedTemplateExpression,
      "TemplateElement" => Syntax::TemplateElement,
      "ObjectPattern" => Syntax::ObjectPattern,
      "ArrayPattern" => Syntax::ArrayPattern,
      "RestElement" => Syntax::RestElement,
      "AssignmentPattern" => Syntax::AssignmentPattern,
      "ClassBody" => Syntax::ClassBody,
      "MethodDefinition" => Syntax::MethodDefinition,
      "ClassDeclaration" => Syntax::ClassDeclaration,
      "ClassExpression" => Syntax::ClassExpression,
      "MetaProperty" => Syntax::MetaProperty,
      "ImportDeclaration" => Syntax::ImportDeclaration,
      "ImportSpecifier" => Syntax::ImportSpecifier,
      "ImportDefaultSpecifier" => Syntax::ImportDefaultSpecifier,
      "ImportNamespaceSpecifier" => Syntax::ImportNamespaceSpecifier,
      "ExportNamedDeclaration" => Syntax::ExportNamedDeclaration,
      "ExportSpecifier" => Syntax::ExportSpecifier,
      "ExportDefaultDeclaration" => Syntax::ExportDefaultDeclaration,
      "ExportAllDeclaration" => Syntax::ExportAllDeclaration,
      "ChainExpression" => Syntax::ChainExpression,
      "ImportExpression" => Syntax::ImportExpression,
      "ParenthesizedExpression" => Syntax::ParenthesizedExpression,
      "PrivateIdentifier" => Syntax::PrivateIdentifier,
      "PropertyDefinition" => Syntax::PropertyDefinition,
      "StaticBlock" => Syntax::StaticBlock,
      other => Syntax::Unknown(other.to_string()),
    }
  }
}
