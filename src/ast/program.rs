//! プログラム構造

use serde::{Deserialize, Serialize};

use super::{Identifier, Span, Statement, TypeSpecifier};

/// ASTのルートノード（単一の関数定義からなるプログラム）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub function: FunctionDefinition,
    pub span: Span,
}

/// 関数定義: `i32 main() { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub return_type: TypeSpecifier,
    pub name: Identifier,
    pub body: Vec<Statement>,
    pub span: Span,
}
