//! 構文エラーのテスト

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_missing_semicolon() {
    let err = assert_parse_error("i32 main() { return 0 }");
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            expected: "';'".to_string(),
            found: "'}'".to_string(),
            span: Span::new(22, 23),
        }
    );
}

#[test]
fn test_unexpected_end_of_input() {
    let err = assert_parse_error("i32 main() { return 0;");
    assert!(matches!(err, ParseError::UnexpectedEof { .. }));
}

#[test]
fn test_eof_span_points_past_last_token() {
    let err = assert_parse_error("i32 main(");
    assert_eq!(
        err,
        ParseError::UnexpectedEof {
            expected: "')'".to_string(),
            span: Span::new(9, 9),
        }
    );
}

#[test]
fn test_missing_expression() {
    let err = assert_parse_error("i32 main() { return ; }");
    assert!(matches!(
        err,
        ParseError::UnexpectedToken { ref expected, .. } if expected == "expression"
    ));
}

#[test]
fn test_trailing_tokens_after_function() {
    let err = assert_parse_error("i32 main() { return 0; } extra");
    assert!(matches!(
        err,
        ParseError::UnexpectedToken { ref expected, ref found, .. }
            if expected == "end of input" && found == "extra"
    ));
}

#[test]
fn test_function_parameters_are_rejected() {
    assert_parse_error("i32 main(i32 a) { return a; }");
}

#[test]
fn test_unbalanced_parentheses() {
    assert_parse_error("i32 main() { return (1 + 2; }");
    assert_parse_error("i32 main() { return 1 + 2); }");
}

#[test]
fn test_dangling_operator() {
    assert_parse_error("i32 main() { return 1 +; }");
    assert_parse_error("i32 main() { i32 a = ; return 0; }");
}

#[test]
fn test_declaration_requires_names() {
    assert_parse_error("i32 main() { i32 a, ; return 0; }");
}

#[test]
fn test_empty_source() {
    let err = assert_parse_error("");
    assert_eq!(
        err,
        ParseError::UnexpectedEof {
            expected: "identifier".to_string(),
            span: Span::new(0, 0),
        }
    );
}
