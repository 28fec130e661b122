//! 文と関数定義のパーサーテスト

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_function_definition() {
    let ast = assert_parse_success("int main() { return 0; }");
    let func = &ast.function;

    assert_eq!(func.return_type.name, "int");
    assert_eq!(func.name.name, "main");
    assert_eq!(func.body.len(), 1);
    assert_eq!(func.span, Span::new(0, 24));
    assert_eq!(ast.span, func.span);
}

#[test]
fn test_empty_body_parses() {
    // return文の有無は構文ではなくコンパイラが検査する
    let ast = assert_parse_success("i32 main() {}");
    assert!(ast.function.body.is_empty());
}

#[test]
fn test_statement_kinds() {
    let source = r#"
    i32 main() {
        i32 a; a = 6;
        a = a + 10;
        return 0 - (a + 8 * 3 / 2);
    }
    "#;
    let ast = assert_parse_success(source);
    let body = &ast.function.body;

    assert_eq!(body.len(), 4);
    assert!(matches!(body[0], Statement::Declaration(_)));
    assert!(matches!(body[1], Statement::Expression(_)));
    assert!(matches!(body[2], Statement::Expression(_)));
    assert!(matches!(body[3], Statement::Return(_)));
}

#[test]
fn test_multiple_declarators() {
    let ast = assert_parse_success("i32 main() { i32 a = 6, d, f = 3; return a; }");
    let Statement::Declaration(decl) = &ast.function.body[0] else {
        panic!("expected declaration");
    };

    assert_eq!(decl.specifier.name, "i32");
    let names: Vec<_> = decl.declarators.iter().map(|d| d.name.name.as_str()).collect();
    assert_eq!(names, vec!["a", "d", "f"]);

    let has_initializer: Vec<_> = decl
        .declarators
        .iter()
        .map(|d| d.initializer.is_some())
        .collect();
    assert_eq!(has_initializer, vec![true, false, true]);
}

#[test]
fn test_declarator_spans() {
    let source = "i32 main() { i64 x = 1, y; return 0; }";
    let ast = assert_parse_success(source);
    let Statement::Declaration(decl) = &ast.function.body[0] else {
        panic!("expected declaration");
    };

    assert_eq!(decl.specifier.span, Span::new(13, 16));
    assert_eq!(decl.declarators[0].span, Span::new(17, 22));
    assert_eq!(decl.declarators[1].name.span, Span::new(24, 25));
    assert_eq!(&source[decl.span.start..decl.span.end], "i64 x = 1, y;");
}

#[test]
fn test_assignment_statement() {
    let ast = assert_parse_success("i32 main() { i32 a; (a) = 5; return a; }");
    let Statement::Expression(stmt) = &ast.function.body[1] else {
        panic!("expected expression statement");
    };
    let Expression::Assignment(assign) = &stmt.expr else {
        panic!("expected assignment");
    };
    assert!(matches!(
        unwrap_single(&assign.target),
        Expression::Parenthesized(_)
    ));
}

#[test]
fn test_non_assignment_expression_statement_parses() {
    let ast = assert_parse_success("i32 main() { 1 + 2; return 0; }");
    assert!(matches!(ast.function.body[0], Statement::Expression(_)));
}

#[test]
fn test_return_value() {
    let ast = assert_parse_success("i32 main() { return x * 2; }");
    let value = return_value(&ast);
    let mul = multiplicative(&additive(value).first);
    assert_eq!(operators(mul), vec!["*"]);
}

#[test]
fn test_statements_after_return_still_parse() {
    let ast = assert_parse_success("i32 main() { return 1; return 2; }");
    assert_eq!(ast.function.body.len(), 2);
}
