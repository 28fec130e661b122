//! スタックマシン命令と命令列

use std::fmt;

use super::symbol_table::{SlotDeclaration, SlotId};
use super::types::ScalarType;

/// スタックマシン命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 定数をスタックに積む
    PushConstant(i64),
    /// スロットの値をスタックに積む
    LoadSlot(SlotId),
    /// スタックの先頭をスロットに格納する
    StoreSlot(SlotId),
    Add,
    Sub,
    Mul,
    DivSigned,
    RemSigned,
    /// スタックの先頭を関数の戻り値として返す
    Return,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::PushConstant(value) => write!(f, "push.const {}", value),
            Instruction::LoadSlot(slot) => write!(f, "load.slot {}", slot),
            Instruction::StoreSlot(slot) => write!(f, "store.slot {}", slot),
            Instruction::Add => write!(f, "add"),
            Instruction::Sub => write!(f, "sub"),
            Instruction::Mul => write!(f, "mul"),
            Instruction::DivSigned => write!(f, "div.s"),
            Instruction::RemSigned => write!(f, "rem.s"),
            Instruction::Return => write!(f, "ret"),
        }
    }
}

/// 追記専用の命令列
///
/// 発行された命令は並べ替えられず、バックエンドは発行順に実行する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionSequence {
    instructions: Vec<Instruction>,
}

impl InstructionSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.instructions
    }

    /// return命令の数
    pub fn return_count(&self) -> usize {
        self.iter().filter(|i| **i == Instruction::Return).count()
    }
}

impl<'a> IntoIterator for &'a InstructionSequence {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

/// コンパイル済み関数（バックエンドへの入力）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFunction {
    pub name: String,
    pub return_type: ScalarType,
    pub slots: Vec<SlotDeclaration>,
    pub instructions: InstructionSequence,
}

impl fmt::Display for CompiledFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ".function {} {}()", self.return_type, self.name)?;
        if !self.slots.is_empty() {
            writeln!(f, ".locals")?;
            for decl in &self.slots {
                writeln!(f, "    [{}] {} {}", decl.slot, decl.ty, decl.name)?;
            }
        }
        for (offset, instruction) in self.instructions.iter().enumerate() {
            writeln!(f, "IL_{:04x}: {}", offset, instruction)?;
        }
        Ok(())
    }
}
