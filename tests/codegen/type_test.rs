//! 型マッパーのテスト

use super::*;
use test_case::test_case;
use wist::ast::{Span, TypeSpecifier};
use wist::codegen::{ScalarType, TypeMapper};

fn specifier(name: &str) -> TypeSpecifier {
    TypeSpecifier {
        name: name.to_string(),
        span: Span::new(0, name.len()),
    }
}

#[test_case("i8", ScalarType::I8 ; "i8")]
#[test_case("i16", ScalarType::I16 ; "i16")]
#[test_case("i32", ScalarType::I32 ; "i32")]
#[test_case("i64", ScalarType::I64 ; "i64")]
#[test_case("f32", ScalarType::F32 ; "f32")]
#[test_case("f64", ScalarType::F64 ; "f64")]
#[test_case("I32", ScalarType::I32 ; "upper case")]
#[test_case("char", ScalarType::I8 ; "c char")]
#[test_case("short", ScalarType::I16 ; "c short")]
#[test_case("int", ScalarType::I32 ; "c int")]
#[test_case("long", ScalarType::I64 ; "c long")]
#[test_case("float", ScalarType::F32 ; "c float")]
#[test_case("double", ScalarType::F64 ; "c double")]
fn test_supported_specifiers(name: &str, expected: ScalarType) {
    assert_eq!(TypeMapper::new().map(&specifier(name)).unwrap(), expected);
}

#[test_case("u32" ; "unsigned")]
#[test_case("bool" ; "bool")]
#[test_case("i128" ; "wide integer")]
#[test_case("void" ; "void")]
#[test_case("string" ; "string")]
fn test_unsupported_specifiers(name: &str) {
    let err = TypeMapper::new().map(&specifier(name)).unwrap_err();
    assert_eq!(
        err,
        CompileError::UnsupportedType {
            name: name.to_string(),
            span: Span::new(0, name.len()),
        }
    );
}

#[test_case("i8", 8 ; "i8")]
#[test_case("i16", 16 ; "i16")]
#[test_case("i32", 32 ; "i32")]
#[test_case("i64", 64 ; "i64")]
#[test_case("f32", 32 ; "f32")]
#[test_case("f64", 64 ; "f64")]
fn test_bit_widths(name: &str, width: u32) {
    let ty = TypeMapper::new().lookup(name).unwrap();
    assert_eq!(ty.bit_width(), width);
    assert_eq!(ty.to_string(), name);
}

#[test]
fn test_integer_return_types_compile() {
    for ty in ["i8", "i16", "i32", "i64", "char", "long"] {
        let function = assert_compile_success(&format!("{} main() {{ return 1; }}", ty));
        assert!(function.return_type.is_integer());
    }
}
