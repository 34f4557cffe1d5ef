use crate::expression::{Expression, InfixOperator};
use crate::lexer::{LexerError, Number, tokenize};
use crate::parser::{InputError, ParserError, parse, parse_expression, parse_expression_with_variable};

fn int(n: i64) -> Expression {
    Expression::number(Number::Integer(n))
}

fn float(n: f64) -> Expression {
    Expression::number(Number::Float(n))
}

fn infix(left: Expression, operator: InfixOperator, right: Expression) -> Expression {
    Expression::infix(left, operator, right)
}

fn parse_error(text: &str) -> Option<ParserError> {
    match parse_expression(text) {
        Err(InputError::Parser(e)) => Some(e),
        _ => None,
    }
}

#[test]
fn test_number_and_variable() {
    assert_eq!(parse_expression("5"), Ok(int(5)));
    assert_eq!(parse_expression("2.5"), Ok(float(2.5)));
    assert_eq!(parse_expression("x"), Ok(Expression::Variable));
}

#[test]
fn test_prefix_minus_and_plus() {
    assert_eq!(parse_expression("-5"), Ok(Expression::negate(int(5))));
    assert_eq!(
        parse_expression("--x"),
        Ok(Expression::negate(Expression::negate(Expression::Variable)))
    );
    assert_eq!(parse_expression("+5"), Ok(int(5)));
    assert_eq!(parse_expression("+x"), Ok(Expression::Variable));
    assert_eq!(
        parse_expression("+-x"),
        Ok(Expression::negate(Expression::Variable))
    );
}

#[test]
fn test_prefix_minus_takes_rest_of_expression() {
    assert_eq!(
        parse_expression("-x+1"),
        Ok(Expression::negate(infix(
            Expression::Variable,
            InfixOperator::Add,
            int(1)
        )))
    );
}

#[test]
fn test_precedence() {
    assert_eq!(
        parse_expression("3 * 4 + 5"),
        Ok(infix(
            infix(int(3), InfixOperator::Multiply, int(4)),
            InfixOperator::Add,
            int(5)
        ))
    );
    assert_eq!(
        parse_expression("3 + 4 * 5"),
        Ok(infix(
            int(3),
            InfixOperator::Add,
            infix(int(4), InfixOperator::Multiply, int(5))
        ))
    );
    assert_eq!(
        parse_expression("(3 + 4) * 5"),
        Ok(infix(
            infix(int(3), InfixOperator::Add, int(4)),
            InfixOperator::Multiply,
            int(5)
        ))
    );
}

#[test]
fn test_left_associativity() {
    assert_eq!(
        parse_expression("8 - 3 - 1"),
        Ok(infix(
            infix(int(8), InfixOperator::Subtract, int(3)),
            InfixOperator::Subtract,
            int(1)
        ))
    );
    assert_eq!(
        parse_expression("8 / 4 / 2"),
        Ok(infix(
            infix(int(8), InfixOperator::Divide, int(4)),
            InfixOperator::Divide,
            int(2)
        ))
    );
}

#[test]
fn test_exponent_is_right_associative() {
    assert_eq!(
        parse_expression("3 ^ 2 ^ 2"),
        Ok(infix(
            int(3),
            InfixOperator::Power,
            infix(int(2), InfixOperator::Power, int(2))
        ))
    );
}

#[test]
fn test_function_calls() {
    assert_eq!(
        parse_expression("sqrt(16)"),
        Ok(Expression::call("sqrt", int(16)))
    );
    assert_eq!(
        parse_expression("log10(100*x)"),
        Ok(Expression::call(
            "log10",
            infix(int(100), InfixOperator::Multiply, Expression::Variable)
        ))
    );
}

#[test]
fn test_missing_closing_parenthesis_at_end_is_tolerated() {
    assert_eq!(
        parse_expression("sin(3+x"),
        Ok(Expression::call(
            "sin",
            infix(int(3), InfixOperator::Add, Expression::Variable)
        ))
    );
    assert_eq!(
        parse_expression("(1+2"),
        Ok(infix(int(1), InfixOperator::Add, int(2)))
    );
}

#[test]
fn test_implicit_multiplication() {
    assert_eq!(
        parse_expression("5x"),
        Ok(infix(int(5), InfixOperator::Multiply, Expression::Variable))
    );
    assert_eq!(
        parse_expression("x(3 + 4)"),
        Ok(infix(
            Expression::Variable,
            InfixOperator::Multiply,
            infix(int(3), InfixOperator::Add, int(4))
        ))
    );
    assert_eq!(
        parse_expression("xsqrt(3 + 4)x"),
        Ok(infix(
            Expression::Variable,
            InfixOperator::Multiply,
            infix(
                Expression::call("sqrt", infix(int(3), InfixOperator::Add, int(4))),
                InfixOperator::Multiply,
                Expression::Variable
            )
        ))
    );
}

#[test]
fn test_implicit_multiplication_binds_below_exponent() {
    assert_eq!(
        parse_expression("2x^2"),
        Ok(infix(
            int(2),
            InfixOperator::Multiply,
            infix(Expression::Variable, InfixOperator::Power, int(2))
        ))
    );
}

#[test]
fn test_parser_errors() {
    let cases = [
        ("5 +", "ParserError: Nothing to parse at the end of the input"),
        ("-", "ParserError: Nothing to parse at the end of the input"),
        ("3 + * 4", "ParserError: No prefix function for *"),
        ("sqrt()", "ParserError: No prefix function for )"),
        ("3 4", "ParserError: Not a valid expression"),
        ("x 5", "ParserError: Not a valid expression"),
        ("x.5", "ParserError: Not a valid expression"),
        (".5", "ParserError: No prefix function for ."),
        ("sqrt", "ParserError: Expected left parenthesis"),
        ("sqrt 4", "ParserError: Expected left parenthesis"),
        ("(1 2)", "ParserError: Expected right parenthesis"),
    ];
    for (input, expected) in cases {
        let error = parse_error(input);
        assert!(error.is_some(), "expected a parser error for {:?}", input);
        if let Some(e) = error {
            assert_eq!(e.to_string(), expected, "input {:?}", input);
        }
    }
}

#[test]
fn test_empty_token_list() {
    assert_eq!(parse(&[]), Err(ParserError::EndOfInput));
}

#[test]
fn test_lexer_errors_pass_through() {
    assert_eq!(
        parse_expression("3x,"),
        Err(InputError::Lexer(LexerError::InvalidCharacter { position: 3 }))
    );
}

#[test]
fn test_parse_is_deterministic() {
    let first = tokenize("x^3-5x+sin(2x)").map(|tokens| parse(&tokens));
    let second = tokenize("x^3-5x+sin(2x)").map(|tokens| parse(&tokens));
    assert!(matches!(first, Ok(Ok(_))));
    assert_eq!(first, second);
}

#[test]
fn test_custom_variable_symbol() {
    assert_eq!(
        parse_expression_with_variable("2t", 't'),
        parse_expression("2x")
    );
}
