mod parser_tests {
    use pretty_assertions::assert_eq;

    use lox_expr as lox;

    use lox::ast_printer::AstPrinter;
    use lox::error::{LoxError, Result};
    use lox::expr::Expr;
    use lox::parser::Parser;
    use lox::scanner::Scanner;
    use lox::token::Token;

    fn scan(source: &str) -> Vec<Token<'_>> {
        Scanner::new(source).filter_map(Result::ok).collect()
    }

    /// Parse `source` and render the tree in prefix form; the printed form
    /// is the easiest way to pin down tree shape.
    fn printed(source: &str) -> String {
        let tokens = scan(source);
        let expr = Parser::new(&tokens).parse().expect("expression parses");

        AstPrinter.print(&expr)
    }

    fn parse_error(source: &str) -> LoxError {
        let tokens = scan(source);
        let result: Result<Expr<'_>> = Parser::new(&tokens).parse();

        result.expect_err("parse fails")
    }

    #[test]
    fn test_literals() {
        assert_eq!(printed("123"), "123.0");
        assert_eq!(printed("45.67"), "45.67");
        assert_eq!(printed("\"hi\""), "hi");
        assert_eq!(printed("true"), "true");
        assert_eq!(printed("false"), "false");
        assert_eq!(printed("nil"), "nil");
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        assert_eq!(printed("1 + 2 * 3"), "(+ 1.0 (* 2.0 3.0))");
    }

    #[test]
    fn test_binary_levels_fold_left() {
        assert_eq!(printed("8 - 4 - 2"), "(- (- 8.0 4.0) 2.0)");
        assert_eq!(printed("8 / 4 / 2"), "(/ (/ 8.0 4.0) 2.0)");
    }

    #[test]
    fn test_comparison_binds_tighter_than_equality() {
        assert_eq!(printed("1 < 2 == true"), "(== (< 1.0 2.0) true)");
    }

    #[test]
    fn test_grouping_overrides_precedence() {
        assert_eq!(printed("(1 + 2) * 3"), "(* (group (+ 1.0 2.0)) 3.0)");
    }

    #[test]
    fn test_unary_is_right_recursive() {
        assert_eq!(printed("--1"), "(- (- 1.0))");
        assert_eq!(printed("!!true"), "(! (! true))");
        assert_eq!(printed("-1 * 2"), "(* (- 1.0) 2.0)");
    }

    #[test]
    fn test_unmatched_paren_reports_at_end() {
        let err = parse_error("(1 + 2");

        match err {
            LoxError::Parse {
                message,
                location,
                line,
            } => {
                assert_eq!(message, "Expect ')' after expression.");
                assert_eq!(location, " at end");
                assert_eq!(line, 1);
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_token_carries_lexeme_and_line() {
        let err = parse_error("1 +\n)");

        match err {
            LoxError::Parse {
                message,
                location,
                line,
            } => {
                assert_eq!(message, "Unexpected token.");
                assert_eq!(location, " at ')'");
                assert_eq!(line, 2);
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_statement_keywords_are_not_expressions() {
        assert!(matches!(
            parse_error("var"),
            LoxError::Parse { location, .. } if location == " at 'var'"
        ));
    }

    #[test]
    fn test_dangling_operator_fails() {
        assert!(matches!(parse_error("1 +"), LoxError::Parse { .. }));
        assert!(matches!(parse_error("*"), LoxError::Parse { .. }));
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            parse_error(""),
            LoxError::Parse { location, .. } if location == " at end"
        ));
    }
}
