//! パーサーモジュール
//!
//! このモジュールはトークンを抽象構文木（AST）に解析する責任を持ちます。
//! 再帰下降構文解析を使用し、C言語の文法レベル（加算式・乗算式・キャスト式・
//! 一次式）をそのまま木の形に残します。
//!
//! ## 対応する文法
//!
//! ```text
//! program        := type IDENT '(' ')' '{' statement* '}'
//! statement      := declaration | 'return' expression ';' | expression ';'
//! declaration    := type init_declarator (',' init_declarator)* ';'
//! init_declarator:= IDENT ('=' assignment)?
//! assignment     := additive ('=' assignment)?
//! additive       := multiplicative (('+' | '-') multiplicative)*
//! multiplicative := cast (('*' | '/' | '%') cast)*
//! cast           := primary
//! primary        := INTEGER | IDENT | '(' expression ')'
//! ```

mod decl_parser;
mod expr_parser;
mod parser_impl;
mod stmt_parser;

// 公開API
pub use parser_impl::Parser;

use crate::error::ParserError;
pub type ParseError = ParserError;
pub type ParseResult<T> = Result<T, ParseError>;
