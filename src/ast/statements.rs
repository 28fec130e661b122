//! 文の定義

use serde::{Deserialize, Serialize};

use super::{Expression, Identifier, Span};

/// 文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Declaration(Declaration),
    Expression(ExpressionStatement),
    Return(ReturnStatement),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Declaration(decl) => decl.span,
            Statement::Expression(stmt) => stmt.span,
            Statement::Return(ret) => ret.span,
        }
    }
}

/// 型指定子（`i32`, `int` など）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSpecifier {
    pub name: String,
    pub span: Span,
}

/// 宣言文: `i32 a = 6, d, f = 3;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub specifier: TypeSpecifier,
    pub declarators: Vec<Declarator>,
    pub span: Span,
}

/// 宣言子（名前と省略可能な初期化子）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declarator {
    pub name: Identifier,
    pub initializer: Option<Expression>,
    pub span: Span,
}

/// 式文: `a = a + 10;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expr: Expression,
    pub span: Span,
}

/// return文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub value: Expression,
    pub span: Span,
}
