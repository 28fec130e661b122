//! 文のコード生成

use crate::ast::*;
use crate::error::{CompileError, CompileResult};

use super::code_generator::CodeGenerator;
use super::instruction::Instruction;

impl CodeGenerator {
    /// 文をコンパイル
    pub fn compile_statement(&mut self, stmt: &Statement) -> CompileResult<()> {
        match stmt {
            Statement::Declaration(decl) => self.compile_declaration(decl),
            Statement::Expression(expr_stmt) => match &expr_stmt.expr {
                Expression::Assignment(assign) => self.compile_assignment(assign),
                _ => Err(CompileError::UnsupportedStatement {
                    message: "式文は代入でなければなりません".to_string(),
                    span: expr_stmt.span,
                }),
            },
            Statement::Return(ret) => self.compile_return(ret),
        }
    }

    /// 宣言文をコンパイル
    ///
    /// 宣言子はソース順に処理する。初期化子があれば先に値モードでコンパイルし、
    /// その後でシンボルを登録してスロットに格納する。このため `i32 a = a;` は
    /// 未宣言エラーになる。
    pub fn compile_declaration(&mut self, decl: &Declaration) -> CompileResult<()> {
        let ty = self.type_mapper.map(&decl.specifier)?;

        for declarator in &decl.declarators {
            match &declarator.initializer {
                None => {
                    self.symbols.declare(&declarator.name, ty)?;
                }
                Some(initializer) => {
                    self.compile_as_value(initializer)?;
                    let slot = self.symbols.declare(&declarator.name, ty)?;
                    self.emit(Instruction::StoreSlot(slot));
                }
            }
        }

        Ok(())
    }

    /// 代入をコンパイル
    pub fn compile_assignment(&mut self, assign: &AssignmentExpr) -> CompileResult<()> {
        let target = self.compile_as_target(&assign.target)?;
        self.compile_as_value(&assign.value)?;

        let slot = self.symbols.resolve(target)?.slot;
        self.emit(Instruction::StoreSlot(slot));
        Ok(())
    }

    /// return文をコンパイル
    pub fn compile_return(&mut self, ret: &ReturnStatement) -> CompileResult<()> {
        self.compile_as_value(&ret.value)?;
        self.emit(Instruction::Return);
        self.return_span = Some(ret.span);
        Ok(())
    }
}
