use crate::ast_printer::literal_text;
use crate::expr::{Expr, Visitor};
use crate::token::Token;
use crate::value::Value;

/// Renders an expression tree in reverse-Polish order: operands first,
/// operator last, groupings fully transparent.
///
/// The output is one-directional: this grammar cannot re-parse it. The
/// printer exists to prove the visitor protocol is operation-agnostic, and
/// as a second diagnostic view of the same tree.
pub struct RpnPrinter;

impl RpnPrinter {
    pub fn print(&mut self, expr: &Expr<'_>) -> String {
        expr.accept(self)
    }
}

impl Visitor<String> for RpnPrinter {
    fn visit_binary(&mut self, left: &Expr<'_>, operator: &Token<'_>, right: &Expr<'_>) -> String {
        format!(
            "{} {} {}",
            left.accept(self),
            right.accept(self),
            operator.lexeme
        )
    }

    fn visit_grouping(&mut self, inner: &Expr<'_>) -> String {
        inner.accept(self)
    }

    fn visit_literal(&mut self, value: &Value) -> String {
        literal_text(value)
    }

    fn visit_unary(&mut self, operator: &Token<'_>, right: &Expr<'_>) -> String {
        format!("{} {}", right.accept(self), operator.lexeme)
    }
}
