//! 式の定義

use serde::{Deserialize, Serialize};

use super::Span;

/// 式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// `target = value`
    Assignment(AssignmentExpr),
    /// `+` / `-` の優先順位レベル
    Additive(OperatorChain),
    /// `*` / `/` / `%` の優先順位レベル
    Multiplicative(OperatorChain),
    Parenthesized(ParenExpr),
    Identifier(Identifier),
    Integer(IntegerLiteral),
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Assignment(assign) => assign.span,
            Expression::Additive(chain) | Expression::Multiplicative(chain) => chain.span,
            Expression::Parenthesized(paren) => paren.span,
            Expression::Identifier(id) => id.span,
            Expression::Integer(lit) => lit.span,
        }
    }
}

/// 同じ優先順位の演算子で連結されたN項の式
///
/// `a - b + c` は `first = a`, `rest = [(-, b), (+, c)]` となる。
/// 各演算子は右側のオペランドと対になっているので、位置計算なしで取り出せる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorChain {
    pub first: Box<Expression>,
    pub rest: Vec<ChainLink>,
    pub span: Span,
}

impl OperatorChain {
    /// 単項（演算子なし）のチェーン
    pub fn single(operand: Expression) -> Self {
        let span = operand.span();
        Self {
            first: Box::new(operand),
            rest: Vec::new(),
            span,
        }
    }

    /// オペランドの数
    pub fn operand_count(&self) -> usize {
        self.rest.len() + 1
    }
}

/// チェーン中の (演算子, 右オペランド) の組
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainLink {
    pub operator: OperatorToken,
    pub operand: Expression,
}

/// 演算子位置に現れたトークン（テキストのまま保持する）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorToken {
    pub text: String,
    pub span: Span,
}

/// 括弧式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParenExpr {
    pub inner: Box<Expression>,
    pub span: Span,
}

/// 識別子
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// 整数リテラル（10進表記のテキスト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerLiteral {
    pub text: String,
    pub span: Span,
}

/// 代入式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentExpr {
    pub target: Box<Expression>,
    pub value: Box<Expression>,
    pub span: Span,
}
