//! 型指定子からマシン上の値表現への変換

use crate::ast::TypeSpecifier;
use crate::error::{CompileError, CompileResult};
use std::fmt;

/// スロットや評価スタック上の値のマシン表現
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl ScalarType {
    /// ビット幅
    pub fn bit_width(self) -> u32 {
        match self {
            ScalarType::I8 => 8,
            ScalarType::I16 => 16,
            ScalarType::I32 | ScalarType::F32 => 32,
            ScalarType::I64 | ScalarType::F64 => 64,
        }
    }

    /// 符号付き整数型かチェック
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ScalarType::I8 | ScalarType::I16 | ScalarType::I32 | ScalarType::I64
        )
    }

    /// 浮動小数点型かチェック
    pub fn is_float(self) -> bool {
        matches!(self, ScalarType::F32 | ScalarType::F64)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::I8 => "i8",
            ScalarType::I16 => "i16",
            ScalarType::I32 => "i32",
            ScalarType::I64 => "i64",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
        };
        write!(f, "{}", name)
    }
}

/// 型マッパー
///
/// 固定の型名集合だけを受け付ける。`i8`〜`f64` は大文字小文字を区別せず、
/// C言語の綴り（`char`, `short`, `int`, `long`, `float`, `double`）も使える。
/// 宣言ごとに1回だけ参照され、変数の使用時には参照されない。
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeMapper;

impl TypeMapper {
    pub fn new() -> Self {
        Self
    }

    /// 型名を検索
    pub fn lookup(&self, name: &str) -> Option<ScalarType> {
        let ty = match name.to_ascii_lowercase().as_str() {
            "i8" | "char" => ScalarType::I8,
            "i16" | "short" => ScalarType::I16,
            "i32" | "int" => ScalarType::I32,
            "i64" | "long" => ScalarType::I64,
            "f32" | "float" => ScalarType::F32,
            "f64" | "double" => ScalarType::F64,
            _ => return None,
        };
        Some(ty)
    }

    /// 型指定子をマシン表現に変換
    pub fn map(&self, specifier: &TypeSpecifier) -> CompileResult<ScalarType> {
        self.lookup(&specifier.name)
            .ok_or_else(|| CompileError::UnsupportedType {
                name: specifier.name.clone(),
                span: specifier.span,
            })
    }
}
