//! 文の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl Parser {
    /// 文を解析（内部実装）
    pub(super) fn parse_statement_internal(&mut self) -> ParseResult<Statement> {
        match (self.current_token(), self.peek(1)) {
            (Some(Token::Return), _) => Ok(Statement::Return(self.parse_return_statement()?)),
            // 識別子が2つ並んだら「型名 変数名」の宣言
            (Some(Token::Identifier(_)), Some(Token::Identifier(_))) => {
                Ok(Statement::Declaration(self.parse_declaration()?))
            }
            _ => {
                let start = self.current_span().start;
                let expr = self.parse_expression_internal()?;
                self.expect(Token::Semicolon)?;
                Ok(Statement::Expression(ExpressionStatement {
                    expr,
                    span: self.span_from(start),
                }))
            }
        }
    }

    /// return文を解析
    fn parse_return_statement(&mut self) -> ParseResult<ReturnStatement> {
        let start = self.current_span().start;
        self.expect(Token::Return)?;

        let value = self.parse_expression_internal()?;
        self.expect(Token::Semicolon)?;

        Ok(ReturnStatement {
            value,
            span: self.span_from(start),
        })
    }
}
