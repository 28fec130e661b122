//! Lexical analysis module for the Wist language.
//!
//! Turns source text into a stream of [`TokenWithPosition`] values. Lexing never
//! fails outright: unrecognized input becomes [`Token::Error`] so the pipeline can
//! report every bad character at once.

#[allow(clippy::module_inception)]
mod lexer;
mod token;

pub use lexer::{format_tokens, Lexer, Position, TokenWithPosition};
pub use token::Token;
