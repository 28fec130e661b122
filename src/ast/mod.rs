//! Abstract Syntax Tree (AST) definitions for the Wist language.
//!
//! The tree mirrors the C grammar levels it was parsed from: every expression
//! passes through an additive chain and a multiplicative chain before reaching a
//! primary, and each chain carries its operator tokens next to the operands they
//! combine.

use serde::{Deserialize, Serialize};

mod expressions;
mod program;
mod statements;

pub use expressions::*;
pub use program::*;
pub use statements::*;

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// 2つのスパンを覆うスパン
    pub fn to(self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}
