//! 式のパーサーテスト

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_single_literal_still_builds_both_chains() {
    // 演算子がなくても各優先順位レベルのチェーンが作られる
    let expr = parse_expr("5");
    let add = additive(&expr);
    assert!(add.rest.is_empty());

    let mul = multiplicative(&add.first);
    assert!(mul.rest.is_empty());
    assert_eq!(
        *mul.first,
        Expression::Integer(IntegerLiteral {
            text: "5".to_string(),
            span: Span::new(0, 1),
        })
    );
}

#[test]
fn test_operator_tokens_travel_with_operands() {
    let expr = parse_expr("1 - 2 + 3");
    let chain = additive(&expr);

    assert_eq!(chain.operand_count(), 3);
    assert_eq!(operators(chain), vec!["-", "+"]);
    assert_eq!(chain.rest[0].operator.span, Span::new(2, 3));
    assert_eq!(chain.rest[1].operator.span, Span::new(6, 7));
}

#[test]
fn test_multiplicative_binds_tighter() {
    let expr = parse_expr("6 + 8 * 3 / 2");
    let add = additive(&expr);
    assert_eq!(operators(add), vec!["+"]);

    // 左オペランドは単項の乗算チェーン
    assert!(multiplicative(&add.first).rest.is_empty());

    // 右オペランドは 8 * 3 / 2 の3項チェーン
    let mul = multiplicative(&add.rest[0].operand);
    assert_eq!(mul.operand_count(), 3);
    assert_eq!(operators(mul), vec!["*", "/"]);
}

#[test]
fn test_modulo_is_multiplicative() {
    let expr = parse_expr("a % b * c");
    let mul = multiplicative(&additive(&expr).first);
    assert_eq!(operators(mul), vec!["%", "*"]);
}

#[test]
fn test_parenthesized_expression() {
    let expr = parse_expr("0 - (6 + 8)");
    let add = additive(&expr);
    assert_eq!(operators(add), vec!["-"]);

    let inner = unwrap_single(&add.rest[0].operand);
    match inner {
        Expression::Parenthesized(paren) => {
            assert_eq!(paren.span, Span::new(4, 11));
            assert_eq!(operators(additive(&paren.inner)), vec!["+"]);
        }
        other => panic!("expected parenthesized expression, got {:?}", other),
    }
}

#[test]
fn test_nested_parentheses() {
    let expr = parse_expr("((a))");
    let Expression::Parenthesized(outer) = unwrap_single(&expr) else {
        panic!("expected parenthesized expression");
    };
    let Expression::Parenthesized(inner) = unwrap_single(&outer.inner) else {
        panic!("expected nested parenthesized expression");
    };
    assert_eq!(
        unwrap_single(&inner.inner),
        &Expression::Identifier(Identifier::new("a", Span::new(2, 3)))
    );
}

#[test]
fn test_assignment_is_right_associative() {
    let expr = parse_expr("a = b = 1");
    let Expression::Assignment(outer) = &expr else {
        panic!("expected assignment");
    };
    assert_eq!(
        unwrap_single(&outer.target),
        &Expression::Identifier(Identifier::new("a", Span::new(0, 1)))
    );

    let Expression::Assignment(inner) = outer.value.as_ref() else {
        panic!("expected nested assignment");
    };
    assert_eq!(
        unwrap_single(&inner.target),
        &Expression::Identifier(Identifier::new("b", Span::new(4, 5)))
    );
    assert_eq!(outer.span, Span::new(0, 9));
}

#[test]
fn test_assignment_target_keeps_its_shape() {
    // 代入先の妥当性はコンパイラが判断する
    let expr = parse_expr("a + b = 3");
    let Expression::Assignment(assign) = &expr else {
        panic!("expected assignment");
    };
    assert_eq!(operators(additive(&assign.target)), vec!["+"]);
}

#[test]
fn test_chain_span_covers_all_operands() {
    let expr = parse_expr("10 - 3 - 2");
    assert_eq!(expr.span(), Span::new(0, 10));
}

#[test]
fn test_ast_serializes_to_json() {
    let program = assert_parse_success("i32 main() { return 1 + 2; }");
    let json = serde_json::to_string(&program).unwrap();
    assert!(json.contains("\"Additive\""));
    assert!(json.contains("\"Multiplicative\""));
    assert!(json.contains("\"text\":\"+\""));
}
