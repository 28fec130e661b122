//! コンパイルエラーのテスト

use super::*;
use pretty_assertions::assert_eq;
use wist::ast::Span;

#[test]
fn test_use_before_declaration() {
    let err = assert_compile_error("i32 main() { return x; }");
    assert_eq!(
        err,
        CompileError::UndeclaredIdentifier {
            name: "x".to_string(),
            span: Span::new(20, 21),
        }
    );
}

#[test]
fn test_assignment_before_declaration() {
    let err = assert_compile_error("i32 main() { a = 1; i32 a; return a; }");
    assert!(matches!(err, CompileError::UndeclaredIdentifier { ref name, .. } if name == "a"));
}

#[test]
fn test_initializer_cannot_see_its_own_name() {
    let err = assert_compile_error("i32 main() { i32 a = a + 1; return a; }");
    assert_eq!(
        err,
        CompileError::UndeclaredIdentifier {
            name: "a".to_string(),
            span: Span::new(21, 22),
        }
    );
}

#[test]
fn test_duplicate_declaration_across_statements() {
    let err = assert_compile_error("i32 main() { i32 a; a = 1; i64 a; return 0; }");
    assert_eq!(
        err,
        CompileError::DuplicateDeclaration {
            name: "a".to_string(),
            span: Span::new(31, 32),
            previous: Span::new(17, 18),
        }
    );
}

#[test]
fn test_duplicate_declaration_in_one_list() {
    let err = assert_compile_error("i32 main() { i32 a = 1, b, a; return 0; }");
    assert!(matches!(err, CompileError::DuplicateDeclaration { ref name, .. } if name == "a"));
}

#[test]
fn test_unknown_type_specifier() {
    let err = assert_compile_error("i32 main() { bool flag; return 0; }");
    assert_eq!(
        err,
        CompileError::UnsupportedType {
            name: "bool".to_string(),
            span: Span::new(13, 17),
        }
    );
}

#[test]
fn test_float_return_type_is_rejected() {
    let err = assert_compile_error("f64 main() { return 1; }");
    assert!(matches!(err, CompileError::UnsupportedType { ref name, .. } if name == "f64"));
}

#[test]
fn test_literal_overflow() {
    let err = assert_compile_error("i64 main() { return 9223372036854775808; }");
    assert_eq!(
        err,
        CompileError::LiteralOverflow {
            literal: "9223372036854775808".to_string(),
            span: Span::new(20, 39),
        }
    );
}

#[test]
fn test_missing_return() {
    let err = assert_compile_error("i32 main() { i32 a; a = 1; }");
    assert!(matches!(err, CompileError::MissingReturn { ref function, .. } if function == "main"));
}

#[test]
fn test_second_return_points_at_first() {
    let err = assert_compile_error("i32 main() { return 1; return 2; }");
    assert_eq!(
        err,
        CompileError::MultipleReturns {
            span: Span::new(23, 32),
            previous: Span::new(13, 22),
        }
    );
}

#[test]
fn test_statement_after_return() {
    let err = assert_compile_error("i32 main() { i32 a; return a; a = 2; }");
    assert!(matches!(err, CompileError::UnreachableStatement { .. }));
}

#[test]
fn test_literal_assignment_target() {
    let err = assert_compile_error("i32 main() { 1 = 2; return 0; }");
    assert_eq!(err, CompileError::InvalidAssignmentTarget { span: Span::new(13, 14) });
}

#[test]
fn test_arithmetic_assignment_target() {
    let err = assert_compile_error("i32 main() { i32 a, b; a + b = 3; return 0; }");
    assert!(matches!(err, CompileError::InvalidAssignmentTarget { .. }));
}

#[test]
fn test_chained_assignment() {
    let err = assert_compile_error("i32 main() { i32 a, b; a = b = 1; return a; }");
    assert!(matches!(err, CompileError::ChainedAssignment { .. }));
}

#[test]
fn test_assignment_inside_arithmetic() {
    let err = assert_compile_error("i32 main() { i32 a, b; a = (b = 1) + 2; return a; }");
    assert!(matches!(err, CompileError::ChainedAssignment { .. }));

    let err = assert_compile_error("i32 main() { i32 a; return (a = 1); }");
    assert!(matches!(err, CompileError::ChainedAssignment { .. }));
}

#[test]
fn test_expression_statement_without_assignment() {
    let err = assert_compile_error("i32 main() { i32 a; a + 1; return a; }");
    assert!(matches!(err, CompileError::UnsupportedStatement { .. }));
}

#[test]
fn test_first_error_wins() {
    // 未宣言の b より前に重複宣言が見つかる
    let err = assert_compile_error("i32 main() { i32 a, a; return b; }");
    assert!(matches!(err, CompileError::DuplicateDeclaration { .. }));
}
