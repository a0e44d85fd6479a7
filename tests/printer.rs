mod printer_tests {
    use pretty_assertions::assert_eq;

    use lox_expr as lox;

    use lox::ast_printer::AstPrinter;
    use lox::expr::Expr;
    use lox::parser::Parser;
    use lox::rpn_printer::RpnPrinter;
    use lox::scanner::Scanner;
    use lox::token::{Token, TokenType};
    use lox::value::Value;

    fn scan(source: &str) -> Vec<Token<'_>> {
        Scanner::new(source).filter_map(Result::ok).collect()
    }

    fn prefix(source: &str) -> String {
        let tokens = scan(source);
        let expr = Parser::new(&tokens).parse().expect("expression parses");

        AstPrinter.print(&expr)
    }

    fn rpn(source: &str) -> String {
        let tokens = scan(source);
        let expr = Parser::new(&tokens).parse().expect("expression parses");

        RpnPrinter.print(&expr)
    }

    #[test]
    fn test_prefix_print_of_hand_built_tree() {
        let minus = Token::new(TokenType::MINUS, "-", 1);
        let star = Token::new(TokenType::STAR, "*", 1);

        let expr = Expr::Binary {
            left: Box::new(Expr::Unary {
                operator: &minus,
                right: Box::new(Expr::Literal(Value::Number(123.0))),
            }),
            operator: &star,
            right: Box::new(Expr::Grouping(Box::new(Expr::Literal(Value::Number(
                45.67,
            ))))),
        };

        assert_eq!(AstPrinter.print(&expr), "(* (- 123.0) (group 45.67))");
    }

    #[test]
    fn test_rpn_print_of_hand_built_tree() {
        let plus = Token::new(TokenType::PLUS, "+", 1);
        let minus = Token::new(TokenType::MINUS, "-", 1);
        let star = Token::new(TokenType::STAR, "*", 1);

        let expr = Expr::Binary {
            left: Box::new(Expr::Binary {
                left: Box::new(Expr::Literal(Value::Number(1.0))),
                operator: &plus,
                right: Box::new(Expr::Literal(Value::Number(2.0))),
            }),
            operator: &star,
            right: Box::new(Expr::Binary {
                left: Box::new(Expr::Literal(Value::Number(4.0))),
                operator: &minus,
                right: Box::new(Expr::Literal(Value::Number(3.0))),
            }),
        };

        assert_eq!(RpnPrinter.print(&expr), "1.0 2.0 + 4.0 3.0 - *");
    }

    #[test]
    fn test_rpn_grouping_is_transparent() {
        assert_eq!(rpn("(1 + 2) * (4 - 3)"), "1.0 2.0 + 4.0 3.0 - *");
    }

    #[test]
    fn test_rpn_unary_operand_comes_first() {
        assert_eq!(rpn("-1 + 2"), "1.0 - 2.0 +");
        assert_eq!(rpn("!true"), "true !");
    }

    #[test]
    fn test_printers_render_every_literal() {
        assert_eq!(prefix("nil"), "nil");
        assert_eq!(prefix("true"), "true");
        assert_eq!(prefix("\"abc\""), "abc");
        assert_eq!(rpn("nil"), "nil");
        assert_eq!(rpn("45.67"), "45.67");
    }

    #[test]
    fn test_printers_are_deterministic() {
        let tokens = scan("1 + (2 * -3) == 4");
        let expr = Parser::new(&tokens).parse().expect("expression parses");

        assert_eq!(AstPrinter.print(&expr), AstPrinter.print(&expr));
        assert_eq!(RpnPrinter.print(&expr), RpnPrinter.print(&expr));
    }

    #[test]
    fn test_prefix_output_of_literals_reparses_to_the_same_text() {
        for source in ["123", "45.67", "true", "false", "nil"] {
            let first = prefix(source);
            let second = prefix(&first);

            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_prefix_grouping_output_is_one_directional() {
        // "(group ...)" is not a production of this grammar: "group" scans
        // as an identifier, which no parse rule accepts.
        let printed = prefix("(1)");
        assert_eq!(printed, "(group 1.0)");

        let tokens = scan(&printed);
        assert!(Parser::new(&tokens).parse().is_err());
    }
}
