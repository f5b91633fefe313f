#![allow(dead_code)]

//! A tiny parser for the expression grammar the evaluator supports, so tests can be written as
//! source text. Panics on anything it doesn't understand.
//!
//! ```text
//! program    = (expression ";"?)*
//! expression = term (("+" | "-") term)*
//! term       = atom (("*" | "/" | "%") atom)*
//! atom       = number | string | "true" | "false" | "null" | identifier
//! ```

use step_js::ast::BinaryExpression;
use step_js::ast::BinaryOperator;
use step_js::ast::ExpressionStatement;
use step_js::ast::Literal;
use step_js::ast::LiteralValue;
use step_js::ast::Node;
use step_js::ast::Program;
use step_js::ast::Syntax;
use step_js::Loc;

pub fn parse(source: &str) -> Node {
  let mut parser = Parser {
    chars: source.chars().collect(),
    next: 0,
  };
  let mut body = Vec::new();
  loop {
    parser.skip_whitespace();
    if parser.peek().is_none() {
      break;
    }
    let expression = parser.expression();
    let start = expression.loc.start();
    let mut end = expression.loc.end();
    parser.skip_whitespace();
    if parser.peek() == Some(';') {
      parser.next += 1;
      end = parser.next;
    }
    body.push(Node::new(
      Loc(start, end),
      Syntax::ExpressionStatement(ExpressionStatement { expression }),
    ));
  }
  Node::new(
    Loc(0, parser.chars.len()),
    Syntax::Program(Program { body }),
  )
}

/// Parses a single expression, without the surrounding program and statement.
pub fn parse_expression(source: &str) -> Node {
  let program = parse(source);
  let Syntax::Program(Program { mut body }) = *program.stx else {
    unreachable!();
  };
  assert_eq!(body.len(), 1, "expected exactly one statement in {source:?}");
  let Syntax::ExpressionStatement(stmt) = *body.remove(0).stx else {
    unreachable!();
  };
  stmt.expression
}

/// Wraps `stx` in a program with one expression statement, all spanning `0..len`.
pub fn program_of(len: usize, stx: Syntax) -> Node {
  let loc = Loc(0, len);
  let stmt = Node::new(
    loc,
    Syntax::ExpressionStatement(ExpressionStatement {
      expression: Node::new(loc, stx),
    }),
  );
  Node::new(loc, Syntax::Program(Program { body: vec![stmt] }))
}

struct Parser {
  chars: Vec<char>,
  next: usize,
}

impl Parser {
  fn peek(&self) -> Option<char> {
    self.chars.get(self.next).copied()
  }

  fn skip_whitespace(&mut self) {
    while self.peek().is_some_and(char::is_whitespace) {
      self.next += 1;
    }
  }

  fn expression(&mut self) -> Node {
    let mut left = self.term();
    loop {
      self.skip_whitespace();
      let operator = match self.peek() {
        Some('+') => BinaryOperator::Addition,
        Some('-') => BinaryOperator::Subtraction,
        _ => return left,
      };
      self.next += 1;
      let right = self.term();
      left = binary(operator, left, right);
    }
  }

  fn term(&mut self) -> Node {
    let mut left = self.atom();
    loop {
      self.skip_whitespace();
      let operator = match self.peek() {
        Some('*') => BinaryOperator::Multiplication,
        Some('/') => BinaryOperator::Division,
        Some('%') => BinaryOperator::Remainder,
        _ => return left,
      };
      self.next += 1;
      let right = self.atom();
      left = binary(operator, left, right);
    }
  }

  fn atom(&mut self) -> Node {
    self.skip_whitespace();
    let start = self.next;
    let c = self
      .peek()
      .unwrap_or_else(|| panic!("unexpected end of input at {start}"));
    let value = if c == '\'' || c == '"' {
      self.next += 1;
      let mut value = String::new();
      while let Some(ch) = self.peek() {
        self.next += 1;
        if ch == c {
          return literal(Loc(start, self.next), LiteralValue::String(value), self.raw(start));
        }
        value.push(ch);
      }
      panic!("unterminated string starting at {start}");
    } else if c.is_ascii_digit() || c == '.' {
      while self
        .peek()
        .is_some_and(|ch| ch.is_ascii_digit() || ch == '.')
      {
        self.next += 1;
      }
      let raw = self.raw(start);
      LiteralValue::Number(raw.parse().unwrap_or_else(|_| panic!("bad number {raw:?}")))
    } else if c.is_alphabetic() || c == '_' || c == '$' {
      while self
        .peek()
        .is_some_and(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$')
      {
        self.next += 1;
      }
      match self.raw(start).as_str() {
        "true" => LiteralValue::Boolean(true),
        "false" => LiteralValue::Boolean(false),
        "null" => LiteralValue::Null,
        _ => return Node::new(Loc(start, self.next), Syntax::Identifier),
      }
    } else {
      panic!("unexpected {c:?} at {start}");
    };
    literal(Loc(start, self.next), value, self.raw(start))
  }

  fn raw(&self, start: usize) -> String {
    self.chars[start..self.next].iter().collect()
  }
}

fn literal(loc: Loc, value: LiteralValue, raw: String) -> Node {
  Node::new(
    loc,
    Syntax::Literal(Literal {
      value,
      raw: Some(raw),
    }),
  )
}

fn binary(operator: BinaryOperator, left: Node, right: Node) -> Node {
  Node::new(
    left.loc.extend(right.loc),
    Syntax::BinaryExpression(BinaryExpression {
      operator,
      left,
      right,
    }),
  )
}
