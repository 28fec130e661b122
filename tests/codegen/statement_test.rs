//! 文のコード生成テスト

use super::*;
use pretty_assertions::assert_eq;
use wist::codegen::Instruction::*;
use wist::codegen::{ScalarType, SlotDeclaration};

#[test]
fn test_separate_statements_scenario() {
    let source = r#"
    i32 main() {
        i32 a; a = 6;
        a = a + 10;
        return 0 - (a + 8 * 3 / 2);
    }
    "#;

    assert_eq!(
        instructions(source),
        vec![
            push(6),
            store(0),
            load(0),
            push(10),
            Add,
            store(0),
            push(0),
            load(0),
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
fn test_multiple_declarators_scenario() {
    let source = r#"
    i32 main() {
        i32 b, c;
        i32 a = 6, d, f = 3;
        d = 8; c = 2;
        a = a + 10;
        return 0 - (a + d * f / c);
    }
    "#;
    let function = assert_compile_success(source);

    let slots: Vec<_> = function
        .slots
        .iter()
        .map(|s| (s.slot.index(), s.name.as_str()))
        .collect();
    assert_eq!(slots, vec![(0, "b"), (1, "c"), (2, "a"), (3, "d"), (4, "f")]);

    assert_eq!(
        function.instructions.as_slice(),
        &[
            push(6),
            store(2),
            push(3),
            store(4),
            push(8),
            store(3),
            push(2),
            store(1),
            load(2),
            push(10),
            Add,
            store(2),
            push(0),
            load(2),
            load(3),
            load(4),
            Mul,
            load(1),
            DivSigned,
            Add,
            Sub,
            Return,
        ]
    );
}

#[test]
fn test_declaration_without_initializer_emits_nothing() {
    let function = assert_compile_success("i32 main() { i64 a, b; return 0; }");
    assert_eq!(function.instructions.as_slice(), &[push(0), Return]);
    assert_eq!(function.slots.len(), 2);
}

#[test]
fn test_slot_types_follow_specifier() {
    let function = assert_compile_success(
        "long main() { i8 a; short b; int c; i64 d; float e; F64 f; return 0; }",
    );

    assert_eq!(function.return_type, ScalarType::I64);
    assert_eq!(
        function.slots,
        vec![
            SlotDeclaration { slot: SlotId(0), name: "a".to_string(), ty: ScalarType::I8 },
            SlotDeclaration { slot: SlotId(1), name: "b".to_string(), ty: ScalarType::I16 },
            SlotDeclaration { slot: SlotId(2), name: "c".to_string(), ty: ScalarType::I32 },
            SlotDeclaration { slot: SlotId(3), name: "d".to_string(), ty: ScalarType::I64 },
            SlotDeclaration { slot: SlotId(4), name: "e".to_string(), ty: ScalarType::F32 },
            SlotDeclaration { slot: SlotId(5), name: "f".to_string(), ty: ScalarType::F64 },
        ]
    );
}

#[test]
fn test_initializer_may_use_earlier_declarator() {
    assert_eq!(
        instructions("i32 main() { i32 a = 2, b = a * a; return b; }"),
        vec![push(2), store(0), load(0), load(0), Mul, store(1), load(1), Return]
    );
}

#[test]
fn test_parenthesized_assignment_target() {
    assert_eq!(
        instructions("i32 main() { i32 a; (a) = 5; return a; }"),
        vec![push(5), store(0), load(0), Return]
    );
}

#[test]
fn test_return_is_last_instruction() {
    let function = assert_compile_success("i32 main() { i32 a = 1; a = a * 2; return a; }");
    assert_eq!(function.instructions.return_count(), 1);
    assert_eq!(function.instructions.as_slice().last(), Some(&Return));
}

#[test]
fn test_independent_compilations_are_identical() {
    let source = "i32 main() { i32 a = 6, d, f = 3; d = 8; return a + d * f; }";
    assert_eq!(assert_compile_success(source), assert_compile_success(source));
}

#[test]
fn test_listing() {
    let function = assert_compile_success("i32 main() { i32 a = 6; return a + 1; }");
    let expected = "\
.function i32 main()
.locals
    [0] i32 a
IL_0000: push.const 6
IL_0001: store.slot 0
IL_0002: load.slot 0
IL_0003: push.const 1
IL_0004: add
IL_0005: ret
";
    assert_eq!(function.to_string(), expected);
}
