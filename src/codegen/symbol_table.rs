//! シンボルテーブル
//!
//! 関数全体で1つのスコープだけを持つ。エントリは宣言順に作られ、
//! 削除されることはない。スロット番号は宣言順のインデックスと一致する。

use crate::ast::{Identifier, Span};
use crate::error::{CompileError, CompileResult};
use indexmap::IndexMap;
use std::fmt;

use super::types::ScalarType;

/// ローカル変数の格納スロット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u32);

impl SlotId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// シンボルテーブルエントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub slot: SlotId,
    pub ty: ScalarType,
    /// 宣言位置
    pub span: Span,
}

/// バックエンドに渡すスロット宣言
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDeclaration {
    pub slot: SlotId,
    pub name: String,
    pub ty: ScalarType,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 変数を宣言して新しいスロットを割り当てる
    pub fn declare(&mut self, name: &Identifier, ty: ScalarType) -> CompileResult<SlotId> {
        if let Some(existing) = self.symbols.get(&name.name) {
            return Err(CompileError::DuplicateDeclaration {
                name: name.name.clone(),
                span: name.span,
                previous: existing.span,
            });
        }

        let slot = SlotId(self.symbols.len() as u32);
        log::debug!("declare {} {} -> slot {}", ty, name.name, slot);
        self.symbols.insert(
            name.name.clone(),
            Symbol {
                slot,
                ty,
                span: name.span,
            },
        );
        Ok(slot)
    }

    /// 変数を検索
    pub fn resolve(&self, name: &Identifier) -> CompileResult<&Symbol> {
        self.symbols
            .get(&name.name)
            .ok_or_else(|| CompileError::UndeclaredIdentifier {
                name: name.name.clone(),
                span: name.span,
            })
    }

    /// 名前だけで検索
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// 宣言順のスロット宣言一覧
    pub fn slot_declarations(&self) -> Vec<SlotDeclaration> {
        self.symbols
            .iter()
            .map(|(name, symbol)| SlotDeclaration {
                slot: symbol.slot,
                name: name.clone(),
                ty: symbol.ty,
            })
            .collect()
    }
}
