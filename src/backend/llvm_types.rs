//! スカラー型とLLVM型の対応

use crate::codegen::ScalarType;
use inkwell::context::Context;
use inkwell::types::{BasicTypeEnum, FloatType, IntType};
use inkwell::values::BasicValueEnum;

/// スカラー型に対応するLLVM型を取得
pub(super) fn basic_type(context: &Context, ty: ScalarType) -> BasicTypeEnum<'_> {
    match ty {
        ScalarType::I8 => context.i8_type().into(),
        ScalarType::I16 => context.i16_type().into(),
        ScalarType::I32 => context.i32_type().into(),
        ScalarType::I64 => context.i64_type().into(),
        ScalarType::F32 => context.f32_type().into(),
        ScalarType::F64 => context.f64_type().into(),
    }
}

/// 整数型ならそのLLVM整数型を取得
pub(super) fn int_type(context: &Context, ty: ScalarType) -> Option<IntType<'_>> {
    match ty {
        ScalarType::I8 => Some(context.i8_type()),
        ScalarType::I16 => Some(context.i16_type()),
        ScalarType::I32 => Some(context.i32_type()),
        ScalarType::I64 => Some(context.i64_type()),
        ScalarType::F32 | ScalarType::F64 => None,
    }
}

/// 浮動小数点型ならそのLLVM浮動小数点型を取得
pub(super) fn float_type(context: &Context, ty: ScalarType) -> Option<FloatType<'_>> {
    match ty {
        ScalarType::F32 => Some(context.f32_type()),
        ScalarType::F64 => Some(context.f64_type()),
        _ => None,
    }
}

/// スロットの初期値（ゼロ）
pub(super) fn zero_value(context: &Context, ty: ScalarType) -> BasicValueEnum<'_> {
    match ty {
        ScalarType::I8 => context.i8_type().const_zero().into(),
        ScalarType::I16 => context.i16_type().const_zero().into(),
        ScalarType::I32 => context.i32_type().const_zero().into(),
        ScalarType::I64 => context.i64_type().const_zero().into(),
        ScalarType::F32 => context.f32_type().const_zero().into(),
        ScalarType::F64 => context.f64_type().const_zero().into(),
    }
}

/// 二項演算の両オペランドを揃える型
///
/// 整数同士なら幅の広い方、どちらかが浮動小数点なら浮動小数点型のうち広い方。
pub(super) fn unify(lhs: ScalarType, rhs: ScalarType) -> ScalarType {
    match (lhs.is_float(), rhs.is_float()) {
        (false, false) | (true, true) => {
            if lhs.bit_width() >= rhs.bit_width() {
                lhs
            } else {
                rhs
            }
        }
        (true, false) => lhs,
        (false, true) => rhs,
    }
}
