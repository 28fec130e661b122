//! レキサーのメイン実装

use logos::{Lexer as LogosLexer, Logos, Span};

use super::token::Token;

/// ソース上の行・列位置（1始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new() -> Self {
        Position { line: 1, column: 1 }
    }

    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// 位置情報付きトークン
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPosition {
    pub token: Token,
    pub position: Position,
    pub span: Span,
}

/// Wist言語のレキサー
///
/// 認識できない入力は読み飛ばさず `Token::Error` として返す。
/// エラーの報告はパイプライン側の責務。
pub struct Lexer<'a> {
    inner: LogosLexer<'a, Token>,
    input: &'a str,
    position: Position,
    last_end: usize,
}

impl<'a> Lexer<'a> {
    /// 新しいレキサーを作成
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: Token::lexer(input),
            input,
            position: Position::new(),
            last_end: 0,
        }
    }

    /// すべてのトークンを収集
    pub fn collect_tokens(self) -> Vec<TokenWithPosition> {
        self.collect()
    }

    fn advance_to(&mut self, offset: usize) {
        if offset > self.last_end {
            for ch in self.input[self.last_end..offset].chars() {
                self.position.advance(ch);
            }
            self.last_end = offset;
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = TokenWithPosition;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let span = self.inner.span();

        // スキップされた空白・コメント分だけ位置を進めてからトークン開始位置を記録
        self.advance_to(span.start);
        let position = self.position;
        self.advance_to(span.end);

        let token = result.unwrap_or(Token::Error);
        Some(TokenWithPosition {
            token,
            position,
            span,
        })
    }
}

/// デバッグ用：トークンストリームを文字列として出力
pub fn format_tokens(tokens: &[TokenWithPosition]) -> String {
    tokens
        .iter()
        .map(|t| {
            format!(
                "{:>3}:{:<3} {:?} @ {:?}",
                t.position.line, t.position.column, t.token, t.span
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
