//! トークン定義

use logos::Logos;
use std::fmt;

/// Wist言語のトークン型
///
/// 型名（`i32` や `int` など）は予約語ではなく識別子として字句解析し、
/// 型の解決はコンパイラ側の型マッパーに任せる。
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(skip r"[ \t\f\r\n]+")]
pub enum Token {
    // キーワード
    #[token("return")]
    Return,

    // 識別子（キーワードの後に来る必要がある）
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_owned(), priority = 1)]
    Identifier(String),

    // 整数リテラルは文字列のまま保持し、範囲チェックはコンパイラで行う
    #[regex(r"[0-9]+", |lex| lex.slice().to_owned())]
    Integer(String),

    // 演算子
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Assign,

    // デリミタ
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    // コメント
    #[regex(r"//[^\n]*", logos::skip)]
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", logos::skip)]
    // エラートークン
    Error,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Return => write!(f, "return"),
            Token::Identifier(s) => write!(f, "{}", s),
            Token::Integer(s) => write!(f, "{}", s),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Assign => write!(f, "="),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Error => write!(f, "error"),
        }
    }
}
