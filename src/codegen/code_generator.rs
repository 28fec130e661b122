//! メインコード生成器

use crate::ast::*;
use crate::error::{CompileError, CompileResult};

use super::instruction::{CompiledFunction, Instruction, InstructionSequence};
use super::symbol_table::SymbolTable;
use super::types::TypeMapper;

/// 1つの関数をコンパイルするためのコンテキスト
///
/// シンボルテーブルと命令列はこの構造体が排他的に所有する。
/// 独立した関数をコンパイルするときはインスタンスを分けること。
#[derive(Debug, Default)]
pub struct CodeGenerator {
    pub(super) type_mapper: TypeMapper,
    pub(super) symbols: SymbolTable,
    pub(super) instructions: InstructionSequence,
    /// コンパイル済みのreturn文の位置
    pub(super) return_span: Option<Span>,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// プログラム全体をコンパイル
    pub fn compile_program(self, program: &Program) -> CompileResult<CompiledFunction> {
        self.compile_function(&program.function)
    }

    /// 関数をコンパイル
    ///
    /// 本体を先頭から1度だけ走査する。return文はちょうど1つで、
    /// 本体の最後の文でなければならない。
    pub fn compile_function(mut self, func: &FunctionDefinition) -> CompileResult<CompiledFunction> {
        log::debug!("compiling function {}", func.name.name);

        let return_type = self.type_mapper.map(&func.return_type)?;
        if !return_type.is_integer() {
            return Err(CompileError::UnsupportedType {
                name: func.return_type.name.clone(),
                span: func.return_type.span,
            });
        }

        for stmt in &func.body {
            if let Some(previous) = self.return_span {
                return Err(match stmt {
                    Statement::Return(ret) => CompileError::MultipleReturns {
                        span: ret.span,
                        previous,
                    },
                    other => CompileError::UnreachableStatement { span: other.span() },
                });
            }
            self.compile_statement(stmt)?;
        }

        if self.return_span.is_none() {
            return Err(CompileError::MissingReturn {
                function: func.name.name.clone(),
                span: func.span,
            });
        }

        log::debug!(
            "compiled {} into {} instructions, {} slots",
            func.name.name,
            self.instructions.len(),
            self.symbols.len()
        );

        Ok(CompiledFunction {
            name: func.name.name.clone(),
            return_type,
            slots: self.symbols.slot_declarations(),
            instructions: self.instructions,
        })
    }

    /// 命令を発行
    pub(super) fn emit(&mut self, instruction: Instruction) {
        log::trace!("IL_{:04x}: {}", self.instructions.len(), instruction);
        self.instructions.push(instruction);
    }

    /// これまでに発行された命令列
    pub fn instructions(&self) -> &InstructionSequence {
        &self.instructions
    }
}
