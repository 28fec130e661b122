//! 式の解析
//!
//! 各優先順位レベルは演算子が1つもなくても `OperatorChain` を作る。
//! 単項チェーンの読み飛ばしはコンパイラ側で行う。

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl Parser {
    /// 式を解析（内部実装）
    pub(super) fn parse_expression_internal(&mut self) -> ParseResult<Expression> {
        self.parse_assignment_expression()
    }

    /// 代入式を解析（右結合）
    pub(super) fn parse_assignment_expression(&mut self) -> ParseResult<Expression> {
        let target = self.parse_additive_expression()?;

        if self.match_token(&Token::Assign) {
            let value = self.parse_assignment_expression()?;
            let span = target.span().to(value.span());
            return Ok(Expression::Assignment(AssignmentExpr {
                target: Box::new(target),
                value: Box::new(value),
                span,
            }));
        }

        Ok(target)
    }

    /// 加算式を解析
    pub(super) fn parse_additive_expression(&mut self) -> ParseResult<Expression> {
        let chain = self.parse_chain(
            &[Token::Plus, Token::Minus],
            Self::parse_multiplicative_expression,
        )?;
        Ok(Expression::Additive(chain))
    }

    /// 乗算式を解析
    pub(super) fn parse_multiplicative_expression(&mut self) -> ParseResult<Expression> {
        let chain = self.parse_chain(
            &[Token::Star, Token::Slash, Token::Percent],
            Self::parse_cast_expression,
        )?;
        Ok(Expression::Multiplicative(chain))
    }

    /// 同じ優先順位の演算子で区切られたオペランド列を解析
    fn parse_chain(
        &mut self,
        operators: &[Token],
        mut parse_operand: impl FnMut(&mut Self) -> ParseResult<Expression>,
    ) -> ParseResult<OperatorChain> {
        let first = parse_operand(self)?;
        let mut span = first.span();
        let mut rest = Vec::new();

        while let Some(token) = self.current_token_with_pos() {
            if !operators.contains(&token.token) {
                break;
            }
            let operator = OperatorToken {
                text: token.token.to_string(),
                span: token.span.clone().into(),
            };
            self.advance();

            let operand = parse_operand(self)?;
            span = span.to(operand.span());
            rest.push(ChainLink { operator, operand });
        }

        Ok(OperatorChain {
            first: Box::new(first),
            rest,
            span,
        })
    }

    /// キャスト式を解析（現在は一次式のみ）
    pub(super) fn parse_cast_expression(&mut self) -> ParseResult<Expression> {
        self.parse_primary_expression()
    }

    /// 一次式を解析
    pub(super) fn parse_primary_expression(&mut self) -> ParseResult<Expression> {
        let span = self.current_span();
        match self.current_token() {
            Some(Token::Integer(text)) => {
                let literal = IntegerLiteral {
                    text: text.clone(),
                    span,
                };
                self.advance();
                Ok(Expression::Integer(literal))
            }
            Some(Token::Identifier(name)) => {
                let identifier = Identifier::new(name.clone(), span);
                self.advance();
                Ok(Expression::Identifier(identifier))
            }
            Some(Token::LeftParen) => {
                self.advance();
                let inner = self.parse_expression_internal()?;
                self.expect(Token::RightParen)?;
                Ok(Expression::Parenthesized(ParenExpr {
                    inner: Box::new(inner),
                    span: self.span_from(span.start),
                }))
            }
            _ => Err(self.error_expected("expression")),
        }
    }
}
