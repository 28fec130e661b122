//! Code generation module for the Wist language.
//!
//! This module translates the syntax tree of a single function into a
//! linear stack-machine instruction sequence in one pass. Declarations,
//! assignments and the return statement are compiled in source order;
//! expressions are compiled either as values (code that pushes one value)
//! or as assignment targets (a name, no code).

mod code_generator;
mod expr_codegen;
mod instruction;
mod stmt_codegen;
mod symbol_table;
mod types;

pub use code_generator::CodeGenerator;
pub use instruction::{CompiledFunction, Instruction, InstructionSequence};
pub use symbol_table::{SlotDeclaration, SlotId, Symbol, SymbolTable};
pub use types::{ScalarType, TypeMapper};

use crate::ast::Program;
use crate::error::CompileResult;

/// Compile a whole program with a fresh compilation context.
pub fn compile_program(program: &Program) -> CompileResult<CompiledFunction> {
    CodeGenerator::new().compile_program(program)
}
