//! Wist Language Compiler Library
//!
//! This library compiles single-function programs in a small C subset to a
//! stack-machine instruction sequence, lowers it to LLVM IR and runs it
//! in-process.

pub mod ast;
pub mod backend;
pub mod codegen;
pub mod compiler;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export commonly used types
pub use ast::{Expression, Program, Statement};
pub use backend::{LlvmBackend, LoweredModule};
pub use codegen::{CodeGenerator, CompiledFunction, Instruction, InstructionSequence};
pub use compiler::{compile_source, evaluate, CompilerOptions};
pub use error::{ErrorCollector, WistError, WistResult};
pub use lexer::{Lexer, Token, TokenWithPosition};
pub use parser::{ParseError, ParseResult, Parser};
pub use runtime::Runtime;
