use crate::ast::BinaryExpression;
use crate::ast::BinaryOperator;
use crate::ast::Literal;
use crate::ast::LiteralValue;
use crate::ast::Node;
use crate::ast::Syntax;
use crate::completion::Abrupt;
use crate::completion::Completion;
use crate::completion::CompletionResult;
use crate::error::EvalError;
use crate::loc::Loc;
use crate::num::number_to_string;
use crate::ops::get_value;
use crate::ops::to_number;
use crate::ops::to_primitive;
use crate::ops::to_string;
use crate::value::SpannedValue;
use crate::value::SpecValue;
use crate::value::Type;
use crate::value::Value;
use crate::visualizer::Visualizer;
use tracing::debug;
use tracing::debug_span;

/// Evaluates `node`, issuing each reduction step to `visualizer` and waiting for it to return
/// before continuing.
///
/// An abrupt completion is a successful evaluation and is returned as `Ok`. `Err` means the
/// evaluation could not finish: an unsupported construct, a failed coercion, or a visualizer
/// failure.
pub fn evaluate<V: Visualizer + ?Sized>(
  node: &Node,
  visualizer: &mut V,
) -> Result<Completion, EvalError> {
  let span = debug_span!(
    "step_js.evaluate",
    kind = node.kind(),
    loc = %node.loc,
    steps = tracing::field::Empty,
    outcome = tracing::field::Empty,
  );
  let _guard = span.enter();

  let mut evaluator = Evaluator {
    visualizer,
    steps: 0,
  };
  let result = evaluator
    .evaluate_node(node)
    .and_then(|v| match v {
      SpecValue::Completion(c) => Ok(c),
      other => get_value(other).map(Completion::normal),
    });
  span.record("steps", evaluator.steps);
  match result {
    Ok(c) | Err(Abrupt::Completion(c)) => {
      span.record("outcome", tracing::field::debug(c.typ));
      Ok(c)
    }
    Err(Abrupt::Fatal(err)) => {
      span.record("outcome", "error");
      debug!(error = %err, "evaluation failed");
      Err(err)
    }
  }
}

struct Evaluator<'v, V: Visualizer + ?Sized> {
  visualizer: &'v mut V,
  steps: usize,
}

impl<'v, V: Visualizer + ?Sized> Evaluator<'v, V> {
  fn evaluate_node(&mut self, node: &Node) -> CompletionResult<SpecValue> {
    match &*node.stx {
      Syntax::Program(program) => run_statements(&program.body, |stmt| self.evaluate_node(stmt)),
      Syntax::ExpressionStatement(stmt) => {
        let expr_ref = self.evaluate_node(&stmt.expression)?;
        let value = get_value(expr_ref)?;
        Ok(Completion::normal(value).into())
      }
      Syntax::BinaryExpression(bin) => self.evaluate_binary(node.loc, bin),
      Syntax::Literal(lit) => evaluate_literal(node.loc, lit),

      Syntax::EmptyStatement
      | Syntax::BlockStatement
      | Syntax::IfStatement
      | Syntax::LabeledStatement
      | Syntax::BreakStatement
      | Syntax::ContinueStatement
      | Syntax::WithStatement
      | Syntax::SwitchStatement
      | Syntax::ReturnStatement
      | Syntax::ThrowStatement
      | Syntax::TryStatement
      | Syntax::WhileStatement
      | Syntax::DoWhileStatement
      | Syntax::ForStatement
      | Syntax::ForInStatement
      | Syntax::ForOfStatement
      | Syntax::DebuggerStatement
      | Syntax::FunctionDeclaration
      | Syntax::VariableDeclaration
      | Syntax::VariableDeclarator
      | Syntax::ThisExpression
      | Syntax::ArrayExpression
      | Syntax::ObjectExpression
      | Syntax::Property
      | Syntax::FunctionExpression
      | Syntax::SequenceExpression
      | Syntax::UnaryExpression
      | Syntax::AssignmentExpression
      | Syntax::UpdateExpression
      | Syntax::LogicalExpression
      | Syntax::ConditionalExpression
      | Syntax::CallExpression
      | Syntax::NewExpression
      | Syntax::MemberExpression
      | Syntax::SwitchCase
      | Syntax::CatchClause
      | Syntax::Identifier
      | Syntax::Super
      | Syntax::SpreadElement
      | Syntax::ArrowFunctionExpression
      | Syntax::YieldExpression
      | Syntax::AwaitExpression
      | Syntax::TemplateLiteral
      | Syntax::TaggedTemplateExpression
      | Syntax::TemplateElement
      | Syntax::ObjectPattern
      | Syntax::ArrayPattern
      | Syntax::RestElement
      | Syntax::AssignmentPattern
      | Syntax::ClassBody
      | Syntax::MethodDefinition
      | Syntax::ClassDeclaration
      | Syntax::ClassExpression
      | Syntax::MetaProperty
      | Syntax::ImportDeclaration
      | Syntax::ImportSpecifier
      | Syntax::ImportDefaultSpecifier
      | Syntax::ImportNamespaceSpecifier
      | Syntax::ExportNamedDeclaration
      | Syntax::ExportSpecifier
      | Syntax::ExportDefaultDeclaration
      | Syntax::ExportAllDeclaration
      | Syntax::ChainExpression
      | Syntax::ImportExpression
      | Syntax::ParenthesizedExpression
      | Syntax::PrivateIdentifier
      | Syntax::PropertyDefinition
      | Syntax::StaticBlock
      | Syntax::Unknown(_) => Err(EvalError::UnsupportedNodeKind(node.kind().to_string()).into()),
    }
  }

  fn evaluate_binary(&mut self, loc: Loc, bin: &BinaryExpression) -> CompletionResult<SpecValue> {
    match bin.operator {
      BinaryOperator::Addition => self.evaluate_addition(loc, bin),
      op @ (BinaryOperator::Equality
      | BinaryOperator::Inequality
      | BinaryOperator::StrictEquality
      | BinaryOperator::StrictInequality
      | BinaryOperator::LessThan
      | BinaryOperator::LessThanOrEqual
      | BinaryOperator::GreaterThan
      | BinaryOperator::GreaterThanOrEqual
      | BinaryOperator::BitwiseLeftShift
      | BinaryOperator::BitwiseRightShift
      | BinaryOperator::BitwiseUnsignedRightShift
      | BinaryOperator::Subtraction
      | BinaryOperator::Multiplication
      | BinaryOperator::Division
      | BinaryOperator::Remainder
      | BinaryOperator::Exponentiation
      | BinaryOperator::BitwiseOr
      | BinaryOperator::BitwiseXor
      | BinaryOperator::BitwiseAnd
      | BinaryOperator::In
      | BinaryOperator::Instanceof) => Err(EvalError::UnsupportedOperator(op).into()),
    }
  }

  // ApplyStringOrNumericBinaryOperator for `+`, after evaluating both operands left to right.
  fn evaluate_addition(&mut self, loc: Loc, bin: &BinaryExpression) -> CompletionResult<SpecValue> {
    let lref = self.evaluate_node(&bin.left)?;
    let lval = get_value(lref)?;
    let rref = self.evaluate_node(&bin.right)?;
    let rval = get_value(rref)?;

    let lprim = to_primitive(lval)?;
    let rprim = to_primitive(rval)?;

    if lprim.type_of() == Type::String || rprim.type_of() == Type::String {
      let lstr = to_string(lprim)?;
      let rstr = to_string(rprim)?;
      let (Value::String(l), Value::String(r)) = (&lstr.value, &rstr.value) else {
        return Err(EvalError::InvariantViolation("ToString returned a non-String").into());
      };
      let concatenated = format!("{l}{r}");
      // Values reaching here always carry a range; fall back to the operand nodes regardless.
      let left = lstr.loc.unwrap_or(bin.left.loc);
      let right = rstr.loc.unwrap_or(bin.right.loc);
      self.string_concatenate(left, right)?;
      return Ok(SpannedValue::new(Value::String(concatenated), left.extend(right)).into());
    }

    let lnum = to_number(lprim)?;
    let rnum = to_number(rprim)?;
    let (Value::Number(l), Value::Number(r)) = (lnum.value, rnum.value) else {
      return Err(EvalError::InvariantViolation("ToNumber returned a non-Number").into());
    };
    let sum = l + r;
    self.replace_range(loc, &number_to_string(sum))?;
    Ok(SpannedValue::new(Value::Number(sum), loc).into())
  }

  fn replace_range(&mut self, range: Loc, text: &str) -> Result<(), EvalError> {
    let index = self.next_step_index();
    debug!(step = index, %range, text, "replace range");
    self.visualizer.replace_range(range, text)?;
    Ok(())
  }

  fn string_concatenate(&mut self, left: Loc, right: Loc) -> Result<(), EvalError> {
    let index = self.next_step_index();
    debug!(step = index, %left, %right, "string concatenate");
    self.visualizer.string_concatenate(left, right)?;
    Ok(())
  }

  fn next_step_index(&mut self) -> usize {
    let index = self.steps;
    self.steps += 1;
    index
  }
}

fn evaluate_literal(loc: Loc, lit: &Literal) -> CompletionResult<SpecValue> {
  let value = match &lit.value {
    LiteralValue::Null => Value::Null,
    LiteralValue::Boolean(b) => Value::Bool(*b),
    LiteralValue::Number(n) => Value::Number(*n),
    LiteralValue::String(s) => Value::String(s.clone()),
    other @ (LiteralValue::RegExp { .. } | LiteralValue::BigInt(_)) => {
      return Err(EvalError::UnsupportedLiteral(other.type_name()).into())
    }
  };
  Ok(SpannedValue::new(value, loc).into())
}

/// Evaluates statements in order, dereferencing each result. The first abrupt completion stops
/// the run and becomes its result; otherwise the result is the last statement's value, or
/// `undefined` when there are none.
pub(crate) fn run_statements<'n>(
  statements: &'n [Node],
  mut evaluate: impl FnMut(&'n Node) -> CompletionResult<SpecValue>,
) -> CompletionResult<SpecValue> {
  let mut last = None;
  for stmt in statements {
    let value = get_value(evaluate(stmt)?)?;
    last = Some(value);
  }
  let value = last.unwrap_or_else(|| SpannedValue::synthesized(Value::Undefined));
  Ok(Completion::normal(value).into())
}
