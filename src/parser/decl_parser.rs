//! 関数定義と宣言の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl Parser {
    /// 関数定義を解析: `type name() { statements }`
    pub(super) fn parse_function_definition(&mut self) -> ParseResult<FunctionDefinition> {
        let start = self.current_span().start;
        let return_type = self.parse_type_specifier()?;
        let name = self.expect_identifier()?;

        self.expect(Token::LeftParen)?;
        self.expect(Token::RightParen)?;
        self.expect(Token::LeftBrace)?;

        let mut body = Vec::new();
        while !self.check(&Token::RightBrace) {
            if self.is_at_end() {
                return Err(self.error_expected("'}'"));
            }
            body.push(self.parse_statement_internal()?);
        }
        self.expect(Token::RightBrace)?;

        Ok(FunctionDefinition {
            return_type,
            name,
            body,
            span: self.span_from(start),
        })
    }

    /// 型指定子を解析（型名の妥当性はコンパイラが判断する）
    pub(super) fn parse_type_specifier(&mut self) -> ParseResult<TypeSpecifier> {
        let identifier = self.expect_identifier()?;
        Ok(TypeSpecifier {
            name: identifier.name,
            span: identifier.span,
        })
    }

    /// 宣言文を解析: `type a = 1, b, c = 2;`
    pub(super) fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        let start = self.current_span().start;
        let specifier = self.parse_type_specifier()?;

        let mut declarators = vec![self.parse_declarator()?];
        while self.match_token(&Token::Comma) {
            declarators.push(self.parse_declarator()?);
        }
        self.expect(Token::Semicolon)?;

        Ok(Declaration {
            specifier,
            declarators,
            span: self.span_from(start),
        })
    }

    /// 宣言子を解析: `name` または `name = initializer`
    fn parse_declarator(&mut self) -> ParseResult<Declarator> {
        let name = self.expect_identifier()?;
        let start = name.span.start;

        let initializer = if self.match_token(&Token::Assign) {
            Some(self.parse_assignment_expression()?)
        } else {
            None
        };

        Ok(Declarator {
            name,
            initializer,
            span: self.span_from(start),
        })
    }
}
