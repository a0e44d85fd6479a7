//! Tree-walking evaluator.
//!
//! [`Interpreter`] reduces an expression tree to a single [`Value`] by a
//! strict post-order walk: both operands of a binary node are fully
//! evaluated (left before right) before the operator is applied. There are
//! no short-circuit operators in this subset, so evaluation order never
//! depends on operand values.
//!
//! Type rules per operator:
//!
//! | operator              | operands                             |
//! |-----------------------|--------------------------------------|
//! | unary `-`             | number                               |
//! | unary `!`             | anything (truthiness)                |
//! | `+`                   | two numbers or two strings           |
//! | `-` `*` `/`           | numbers (`/` follows IEEE-754: x/0 is infinity or NaN, never an error) |
//! | `>` `>=` `<` `<=`     | numbers                              |
//! | `==` `!=`             | anything (never a type error)        |
//!
//! A violated rule becomes a [`LoxError::Runtime`] tagged with the operator
//! token's line; it aborts the current evaluation only.

use log::{debug, info};

use crate::error::{LoxError, Result};
use crate::expr::{Expr, Visitor};
use crate::token::{Token, TokenType};
use crate::value::Value;

/// The evaluating visitor. Holds no state between evaluations; one
/// instance can serve a whole interactive session.
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        info!("Initializing Interpreter");

        Self
    }

    /// Evaluate one expression tree to a runtime value.
    pub fn evaluate(&mut self, expr: &Expr<'_>) -> Result<Value> {
        expr.accept(self)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor<Result<Value>> for Interpreter {
    fn visit_literal(&mut self, value: &Value) -> Result<Value> {
        Ok(value.clone())
    }

    fn visit_grouping(&mut self, inner: &Expr<'_>) -> Result<Value> {
        // parentheses have no semantics of their own
        inner.accept(self)
    }

    fn visit_unary(&mut self, operator: &Token<'_>, right: &Expr<'_>) -> Result<Value> {
        let right_val: Value = right.accept(self)?;

        debug!("Unary '{}' on {}", operator.lexeme, right_val);

        match operator.token_type {
            TokenType::MINUS => match right_val {
                Value::Number(n) => Ok(Value::Number(-n)),

                _ => Err(LoxError::runtime(operator, "Operand must be a number.")),
            },

            TokenType::BANG => Ok(Value::Bool(!is_truthy(&right_val))),

            _ => Err(LoxError::runtime(
                operator,
                "Illegal operator in unary expression.",
            )),
        }
    }

    fn visit_binary(
        &mut self,
        left: &Expr<'_>,
        operator: &Token<'_>,
        right: &Expr<'_>,
    ) -> Result<Value> {
        let left_val: Value = left.accept(self)?;
        let right_val: Value = right.accept(self)?;

        debug!(
            "Binary '{}' on {} and {}",
            operator.lexeme, left_val, right_val
        );

        match operator.token_type {
            TokenType::PLUS => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),

                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),

                _ => Err(LoxError::runtime(
                    operator,
                    "Operands must be two numbers or two strings.",
                )),
            },

            TokenType::MINUS => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),

                _ => Err(LoxError::runtime(operator, "Operands must be numbers.")),
            },

            TokenType::STAR => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),

                _ => Err(LoxError::runtime(operator, "Operands must be numbers.")),
            },

            TokenType::SLASH => match (left_val, right_val) {
                // IEEE-754 division: x/0 is ±inf, 0/0 is NaN
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a / b)),

                _ => Err(LoxError::runtime(operator, "Operands must be numbers.")),
            },

            TokenType::GREATER => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a > b)),

                _ => Err(LoxError::runtime(operator, "Operands must be numbers.")),
            },

            TokenType::GREATER_EQUAL => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a >= b)),

                _ => Err(LoxError::runtime(operator, "Operands must be numbers.")),
            },

            TokenType::LESS => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a < b)),

                _ => Err(LoxError::runtime(operator, "Operands must be numbers.")),
            },

            TokenType::LESS_EQUAL => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a <= b)),

                _ => Err(LoxError::runtime(operator, "Operands must be numbers.")),
            },

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(is_equal(&left_val, &right_val))),

            TokenType::BANG_EQUAL => Ok(Value::Bool(!is_equal(&left_val, &right_val))),

            _ => Err(LoxError::runtime(
                operator,
                "Illegal operator in binary expression.",
            )),
        }
    }
}

/// `nil` and `false` are falsy; everything else, including `0` and the
/// empty string, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Nil => false,
        Value::Bool(b) => *b,
        _ => true,
    }
}

/// Value equality: `nil` equals only `nil`; otherwise two values are equal
/// iff they have the same runtime type and equal payloads.
pub fn is_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Nil, Value::Nil) => true,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        _ => false,
    }
}
