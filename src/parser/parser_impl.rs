//! メインパーサー構造とユーティリティ

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::{Token, TokenWithPosition};

use super::{ParseError, ParseResult};

/// Wistパーサー
pub struct Parser {
    pub(super) tokens: Vec<TokenWithPosition>,
    pub(super) current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPosition>) -> Self {
        Self { tokens, current: 0 }
    }

    /// 完全なプログラムを解析
    pub fn parse(&mut self) -> ParseResult<Program> {
        let function = self.parse_function_definition()?;

        if let Some(extra) = self.current_token_with_pos() {
            return Err(ParserError::UnexpectedToken {
                expected: "end of input".to_string(),
                found: extra.token.to_string(),
                span: extra.span.clone().into(),
            });
        }

        Ok(Program {
            span: function.span,
            function,
        })
    }

    /// 単一の式を解析
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_expression_internal()
    }

    /// 単一の文を解析
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        self.parse_statement_internal()
    }

    // ==================== ユーティリティメソッド ====================

    /// 現在のトークンを取得
    pub(super) fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current).map(|t| &t.token)
    }

    /// 現在のトークンを位置情報付きで取得
    pub(super) fn current_token_with_pos(&self) -> Option<&TokenWithPosition> {
        self.tokens.get(self.current)
    }

    /// 特定のオフセット先のトークンを取得
    pub(super) fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.current + offset).map(|t| &t.token)
    }

    /// 現在のスパンを取得（終端では最後のトークンの直後）
    pub(super) fn current_span(&self) -> Span {
        match self.current_token_with_pos() {
            Some(t) => t.span.clone().into(),
            None => {
                let end = self.tokens.last().map(|t| t.span.end).unwrap_or(0);
                Span::new(end, end)
            }
        }
    }

    /// 開始位置から直前のトークンの終了位置までのスパンを作成
    pub(super) fn span_from(&self, start: usize) -> Span {
        let end = if self.current > 0 {
            self.tokens
                .get(self.current - 1)
                .map(|t| t.span.end)
                .unwrap_or(start)
        } else {
            start
        };
        Span::new(start, end)
    }

    /// 次のトークンに進む
    pub(super) fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    /// 終端に到達したかチェック
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// 特定のトークンをチェック（進まない）
    pub(super) fn check(&self, token_type: &Token) -> bool {
        if let Some(token) = self.current_token() {
            std::mem::discriminant(token) == std::mem::discriminant(token_type)
        } else {
            false
        }
    }

    /// 特定のトークンにマッチしたら進む
    pub(super) fn match_token(&mut self, token_type: &Token) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// 特定のトークンを期待
    pub(super) fn expect(&mut self, token_type: Token) -> ParseResult<()> {
        if self.check(&token_type) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_expected(&format!("'{}'", token_type)))
        }
    }

    /// 識別子を期待
    pub(super) fn expect_identifier(&mut self) -> ParseResult<Identifier> {
        match self.current_token() {
            Some(Token::Identifier(name)) => {
                let identifier = Identifier::new(name.clone(), self.current_span());
                self.advance();
                Ok(identifier)
            }
            _ => Err(self.error_expected("identifier")),
        }
    }

    /// 現在位置で `expected` を期待していたというエラーを作成
    pub(super) fn error_expected(&self, expected: &str) -> ParseError {
        match self.current_token_with_pos() {
            Some(found) => ParserError::UnexpectedToken {
                expected: expected.to_string(),
                found: format!("'{}'", found.token),
                span: found.span.clone().into(),
            },
            None => ParserError::UnexpectedEof {
                expected: expected.to_string(),
                span: self.current_span(),
            },
        }
    }
}
