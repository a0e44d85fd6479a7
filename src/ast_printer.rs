use crate::expr::{Expr, Visitor};
use crate::token::Token;
use crate::value::Value;

/// Renders an expression tree in prefix (S-expression) form:
/// `(<operator> <child>...)`, with groupings as `(group <inner>)`.
///
/// Purely diagnostic; the driver logs this form at debug level after a
/// successful parse. Integral number literals keep a forced `.0` here
/// (`4` prints as `4.0`), unlike the evaluator's stringify rule.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(&mut self, expr: &Expr<'_>) -> String {
        expr.accept(self)
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr<'_>]) -> String {
        let mut out: String = format!("({}", name);

        for expr in exprs {
            out.push(' ');
            out.push_str(&expr.accept(self));
        }

        out.push(')');
        out
    }
}

impl Visitor<String> for AstPrinter {
    fn visit_binary(&mut self, left: &Expr<'_>, operator: &Token<'_>, right: &Expr<'_>) -> String {
        self.parenthesize(operator.lexeme, &[left, right])
    }

    fn visit_grouping(&mut self, inner: &Expr<'_>) -> String {
        self.parenthesize("group", &[inner])
    }

    fn visit_literal(&mut self, value: &Value) -> String {
        literal_text(value)
    }

    fn visit_unary(&mut self, operator: &Token<'_>, right: &Expr<'_>) -> String {
        self.parenthesize(operator.lexeme, &[right])
    }
}

/// Literal rendering shared by both printers: strings bare, keywords as
/// themselves, and numbers with an explicit fractional part.
pub(crate) fn literal_text(value: &Value) -> String {
    match value {
        Value::Number(n) => {
            if n.fract() == 0.0 {
                format!("{:.1}", n)
            } else {
                n.to_string()
            }
        }

        Value::String(s) => s.clone(),

        Value::Bool(b) => b.to_string(),

        Value::Nil => "nil".to_string(),
    }
}
