//! 式のコード生成テスト

use super::*;
use pretty_assertions::assert_eq;
use wist::codegen::Instruction::*;

#[test]
fn test_single_literal_has_no_operator() {
    assert_eq!(expression_instructions("7"), vec![push(7), Return]);
}

#[test]
fn test_precedence_scenario() {
    assert_eq!(
        expression_instructions("0 - (6 + 8 * 3 / 2)"),
        vec![
            push(0),
            push(6),
            push(8),
            push(3),
            Mul,
            push(2),
            DivSigned,
            Add,
            Sub,
            Return,
        ]
    );
}

#[test]
fn test_equal_precedence_is_left_associative() {
    // 8 * 3 / 2 は (8 * 3) / 2
    assert_eq!(
        expression_instructions("8 * 3 / 2"),
        vec![push(8), push(3), Mul, push(2), DivSigned, Return]
    );
    // 10 - 3 - 2 は (10 - 3) - 2
    assert_eq!(
        expression_instructions("10 - 3 - 2"),
        vec![push(10), push(3), Sub, push(2), Sub, Return]
    );
}

#[test]
fn test_operator_follows_its_right_operand() {
    // 2項目以降のオペランドが入れ子のチェーンでも、演算子はそのオペランドの直後に来る
    assert_eq!(
        expression_instructions("1 * 2 + 3 * 4 - 5 % 6"),
        vec![
            push(1),
            push(2),
            Mul,
            push(3),
            push(4),
            Mul,
            Add,
            push(5),
            push(6),
            RemSigned,
            Sub,
            Return,
        ]
    );
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        expression_instructions("(1 + 2) * 3"),
        vec![push(1), push(2), Add, push(3), Mul, Return]
    );
}

#[test]
fn test_redundant_parentheses_emit_nothing() {
    assert_eq!(expression_instructions("((((9))))"), vec![push(9), Return]);
}

#[test]
fn test_identifier_in_value_mode_loads_its_slot() {
    assert_eq!(
        instructions("i32 main() { i32 a, b; return b - a; }"),
        vec![load(1), load(0), Sub, Return]
    );
}

#[test]
fn test_identifier_in_name_mode_emits_no_load() {
    // 代入先の a は読み出されない
    assert_eq!(
        instructions("i32 main() { i32 a; a = 1; return 0; }"),
        vec![push(1), store(0), push(0), Return]
    );
}

#[test]
fn test_large_literal_is_kept_as_i64() {
    assert_eq!(
        expression_instructions("9223372036854775807"),
        vec![push(i64::MAX), Return]
    );
}

#[test]
fn test_leading_zeros_are_decimal() {
    assert_eq!(expression_instructions("010"), vec![push(10), Return]);
}
