//! 式のコード生成
//!
//! 式は2つのモードでコンパイルされる。値モード（[`CodeGenerator::compile_as_value`]）は
//! 評価スタックに値を1つ残す命令を発行し、名前モード（[`CodeGenerator::compile_as_target`]）は
//! 命令を発行せずに代入先の識別子を返す。同じ識別子ノードでもどちらで呼ばれたかで意味が変わる。

use crate::ast::*;
use crate::error::{CompileError, CompileResult};

use super::code_generator::CodeGenerator;
use super::instruction::Instruction;

impl CodeGenerator {
    /// 式を値モードでコンパイル
    pub fn compile_as_value(&mut self, expr: &Expression) -> CompileResult<()> {
        match expr {
            Expression::Additive(chain) | Expression::Multiplicative(chain) => {
                self.compile_operator_chain(chain)
            }
            Expression::Parenthesized(paren) => self.compile_as_value(&paren.inner),
            Expression::Identifier(id) => self.compile_identifier(id),
            Expression::Integer(lit) => self.compile_integer_literal(lit),
            // 値を生む代入は命令セットで表現できない
            Expression::Assignment(assign) => Err(CompileError::ChainedAssignment { span: assign.span }),
        }
    }

    /// 式を名前モードでコンパイルし、代入先の識別子を返す
    pub fn compile_as_target<'e>(&self, expr: &'e Expression) -> CompileResult<&'e Identifier> {
        match expr {
            Expression::Identifier(id) => Ok(id),
            Expression::Parenthesized(paren) => self.compile_as_target(&paren.inner),
            Expression::Additive(chain) | Expression::Multiplicative(chain) if chain.rest.is_empty() => {
                self.compile_as_target(&chain.first)
            }
            Expression::Assignment(assign) => Err(CompileError::ChainedAssignment { span: assign.span }),
            other => Err(CompileError::InvalidAssignmentTarget { span: other.span() }),
        }
    }

    /// 同じ優先順位のN項チェーンをコンパイル
    ///
    /// N == 1 なら下位レベルにそのまま委譲する。N >= 2 なら左から順に
    /// オペランドを積み、2項目以降の直後にその左側の演算子の命令を発行する（左結合）。
    fn compile_operator_chain(&mut self, chain: &OperatorChain) -> CompileResult<()> {
        self.compile_as_value(&chain.first)?;

        for link in &chain.rest {
            self.compile_as_value(&link.operand)?;
            let instruction = operator_instruction(&link.operator)?;
            self.emit(instruction);
        }

        Ok(())
    }

    /// 識別子の値を読み出す
    fn compile_identifier(&mut self, id: &Identifier) -> CompileResult<()> {
        let slot = self.symbols.resolve(id)?.slot;
        self.emit(Instruction::LoadSlot(slot));
        Ok(())
    }

    /// 整数リテラルをコンパイル
    fn compile_integer_literal(&mut self, lit: &IntegerLiteral) -> CompileResult<()> {
        let value = lit
            .text
            .parse::<i64>()
            .map_err(|_| CompileError::LiteralOverflow {
                literal: lit.text.clone(),
                span: lit.span,
            })?;
        self.emit(Instruction::PushConstant(value));
        Ok(())
    }
}

/// 演算子トークンを命令に変換
fn operator_instruction(operator: &OperatorToken) -> CompileResult<Instruction> {
    match operator.text.as_str() {
        "*" => Ok(Instruction::Mul),
        "/" => Ok(Instruction::DivSigned),
        "%" => Ok(Instruction::RemSigned),
        "+" => Ok(Instruction::Add),
        "-" => Ok(Instruction::Sub),
        _ => Err(CompileError::InvalidOperator {
            operator: operator.text.clone(),
            span: operator.span,
        }),
    }
}
