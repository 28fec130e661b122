//! 命令列からLLVM関数への変換
//!
//! 評価スタックはコンパイル時にシミュレートする。スタックの各要素は
//! SSA値とそのスカラー型の組で、実行時のスタック操作は発生しない。
//!
//! 整数の除算・剰余は除数0と `MIN / -1` を実行時に検査し、該当すれば
//! トラップハンドラを呼んで関数から抜ける。

use crate::codegen::{CompiledFunction, Instruction, ScalarType, SlotDeclaration, SlotId};
use crate::error::{CodegenError, CodegenResult};
use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::{Linkage, Module};
use inkwell::types::{FloatType, IntType};
use inkwell::values::{BasicValueEnum, FunctionValue, IntValue, PointerValue};
use inkwell::IntPredicate;

use super::llvm_types::{basic_type, float_type, int_type, unify, zero_value};
use super::{TrapKind, TRAP_HANDLER};

/// 評価スタック上の値
#[derive(Debug, Clone, Copy)]
struct StackValue<'ctx> {
    value: BasicValueEnum<'ctx>,
    ty: ScalarType,
}

/// ローカル変数の格納領域
#[derive(Debug, Clone, Copy)]
struct Slot<'ctx> {
    ptr: PointerValue<'ctx>,
    ty: ScalarType,
}

/// 1つの関数本体を変換するための状態
pub(super) struct FunctionLowering<'a, 'ctx> {
    context: &'ctx Context,
    module: &'a Module<'ctx>,
    builder: &'a Builder<'ctx>,
    function: FunctionValue<'ctx>,
    return_type: ScalarType,
    slots: Vec<Slot<'ctx>>,
    stack: Vec<StackValue<'ctx>>,
    returned: bool,
}

fn internal(message: impl Into<String>) -> CodegenError {
    CodegenError::Internal {
        message: message.into(),
    }
}

impl<'a, 'ctx> FunctionLowering<'a, 'ctx> {
    pub(super) fn new(
        context: &'ctx Context,
        module: &'a Module<'ctx>,
        builder: &'a Builder<'ctx>,
        function: FunctionValue<'ctx>,
        return_type: ScalarType,
    ) -> Self {
        Self {
            context,
            module,
            builder,
            function,
            return_type,
            slots: Vec::new(),
            stack: Vec::new(),
            returned: false,
        }
    }

    /// 関数本体を生成
    pub(super) fn lower(mut self, compiled: &CompiledFunction) -> CodegenResult<()> {
        let entry = self.context.append_basic_block(self.function, "entry");
        self.builder.position_at_end(entry);

        for decl in &compiled.slots {
            self.declare_slot(decl)?;
        }

        for (offset, instruction) in compiled.instructions.iter().enumerate() {
            if self.returned {
                return Err(internal(format!(
                    "IL_{:04x}: return命令の後に命令があります",
                    offset
                )));
            }
            log::trace!("lowering IL_{:04x}: {}", offset, instruction);
            self.lower_instruction(*instruction)?;
        }

        if !self.returned {
            return Err(internal(format!(
                "関数 {} の命令列がreturn命令で終わっていません",
                compiled.name
            )));
        }

        Ok(())
    }

    /// スロットを確保してゼロで初期化
    fn declare_slot(&mut self, decl: &SlotDeclaration) -> CodegenResult<()> {
        if decl.slot.index() != self.slots.len() {
            return Err(internal(format!(
                "スロット {} の宣言順が不正です",
                decl.slot
            )));
        }

        let ptr = self.create_entry_block_alloca(&decl.name, decl.ty)?;
        self.builder.build_store(ptr, zero_value(self.context, decl.ty))?;
        self.slots.push(Slot { ptr, ty: decl.ty });
        Ok(())
    }

    /// Create an alloca instruction in the entry block
    fn create_entry_block_alloca(&self, name: &str, ty: ScalarType) -> CodegenResult<PointerValue<'ctx>> {
        let builder = self.context.create_builder();

        let entry = self
            .function
            .get_first_basic_block()
            .ok_or_else(|| internal("エントリブロックがありません"))?;

        match entry.get_first_instruction() {
            Some(first_inst) => builder.position_before(&first_inst),
            None => builder.position_at_end(entry),
        }

        Ok(builder.build_alloca(basic_type(self.context, ty), name)?)
    }

    fn lower_instruction(&mut self, instruction: Instruction) -> CodegenResult<()> {
        match instruction {
            Instruction::PushConstant(value) => {
                self.push_constant(value);
                Ok(())
            }
            Instruction::LoadSlot(slot) => self.load_slot(slot),
            Instruction::StoreSlot(slot) => self.store_slot(slot),
            Instruction::Return => self.return_value(),
            op => self.binary(op),
        }
    }

    /// 32ビットに収まる定数はi32、それ以外はi64として積む
    fn push_constant(&mut self, value: i64) {
        let entry = match i32::try_from(value) {
            Ok(narrow) => StackValue {
                value: self.context.i32_type().const_int(narrow as u64, true).into(),
                ty: ScalarType::I32,
            },
            Err(_) => StackValue {
                value: self.context.i64_type().const_int(value as u64, true).into(),
                ty: ScalarType::I64,
            },
        };
        self.stack.push(entry);
    }

    fn load_slot(&mut self, id: SlotId) -> CodegenResult<()> {
        let slot = self.slot(id)?;
        let loaded = self.builder.build_load(
            basic_type(self.context, slot.ty),
            slot.ptr,
            &format!("slot{}", id),
        )?;

        let mut entry = StackValue {
            value: loaded,
            ty: slot.ty,
        };
        // 32ビット未満の整数はスタック上でi32に拡張する
        if slot.ty.is_integer() && slot.ty.bit_width() < 32 {
            entry = StackValue {
                value: self.convert(entry, ScalarType::I32)?,
                ty: ScalarType::I32,
            };
        }

        self.stack.push(entry);
        Ok(())
    }

    fn store_slot(&mut self, id: SlotId) -> CodegenResult<()> {
        let slot = self.slot(id)?;
        let top = self.pop("store.slot")?;
        let value = self.convert(top, slot.ty)?;
        self.builder.build_store(slot.ptr, value)?;
        Ok(())
    }

    fn return_value(&mut self) -> CodegenResult<()> {
        let top = self.pop("ret")?;
        if !self.stack.is_empty() {
            return Err(internal(format!(
                "return時に評価スタックに {} 個の値が残っています",
                self.stack.len()
            )));
        }

        let value = self.convert(top, self.return_type)?;
        self.builder.build_return(Some(&value))?;
        self.returned = true;
        Ok(())
    }

    /// 二項演算
    fn binary(&mut self, op: Instruction) -> CodegenResult<()> {
        let op_name = op.to_string();
        let rhs = self.pop(&op_name)?;
        let lhs = self.pop(&op_name)?;

        let ty = unify(lhs.ty, rhs.ty);
        let lhs = self.convert(lhs, ty)?;
        let rhs = self.convert(rhs, ty)?;

        let value: BasicValueEnum<'ctx> = if ty.is_float() {
            let (l, r) = (lhs.into_float_value(), rhs.into_float_value());
            match op {
                Instruction::Add => self.builder.build_float_add(l, r, "add")?.into(),
                Instruction::Sub => self.builder.build_float_sub(l, r, "sub")?.into(),
                Instruction::Mul => self.builder.build_float_mul(l, r, "mul")?.into(),
                Instruction::DivSigned => self.builder.build_float_div(l, r, "div")?.into(),
                Instruction::RemSigned => self.builder.build_float_rem(l, r, "rem")?.into(),
                _ => return Err(internal(format!("{} は二項演算命令ではありません", op))),
            }
        } else {
            let (l, r) = (lhs.into_int_value(), rhs.into_int_value());
            match op {
                Instruction::Add => self.builder.build_int_add(l, r, "add")?.into(),
                Instruction::Sub => self.builder.build_int_sub(l, r, "sub")?.into(),
                Instruction::Mul => self.builder.build_int_mul(l, r, "mul")?.into(),
                Instruction::DivSigned | Instruction::RemSigned => {
                    self.checked_division(op, l, r)?.into()
                }
                _ => return Err(internal(format!("{} は二項演算命令ではありません", op))),
            }
        };

        self.stack.push(StackValue { value, ty });
        Ok(())
    }

    /// 符号付き除算・剰余
    ///
    /// 定数で安全と分かる場合は検査を省く。
    fn checked_division(
        &mut self,
        op: Instruction,
        lhs: IntValue<'ctx>,
        rhs: IntValue<'ctx>,
    ) -> CodegenResult<IntValue<'ctx>> {
        let int_type = lhs.get_type();
        let divisor = rhs.get_sign_extended_constant();
        let dividend = lhs.get_sign_extended_constant();
        let min = i64::MIN >> (64 - int_type.get_bit_width());

        if divisor.map_or(true, |d| d == 0) {
            let is_zero =
                self.builder
                    .build_int_compare(IntPredicate::EQ, rhs, int_type.const_zero(), "is_zero")?;
            self.trap_if(is_zero, TrapKind::DivisionByZero)?;
        }

        if divisor.map_or(true, |d| d == -1) && dividend.map_or(true, |v| v == min) {
            let is_min = self.builder.build_int_compare(
                IntPredicate::EQ,
                lhs,
                int_type.const_int(min as u64, true),
                "is_min",
            )?;
            let is_neg_one = self.builder.build_int_compare(
                IntPredicate::EQ,
                rhs,
                int_type.const_all_ones(),
                "is_neg_one",
            )?;
            let overflow = self.builder.build_and(is_min, is_neg_one, "overflow")?;
            self.trap_if(overflow, TrapKind::IntegerOverflow)?;
        }

        let value = match op {
            Instruction::DivSigned => self.builder.build_int_signed_div(lhs, rhs, "div")?,
            _ => self.builder.build_int_signed_rem(lhs, rhs, "rem")?,
        };
        Ok(value)
    }

    /// 条件が真ならトラップハンドラを呼んでゼロを返す
    fn trap_if(&mut self, condition: IntValue<'ctx>, kind: TrapKind) -> CodegenResult<()> {
        let trap_block = self.context.append_basic_block(self.function, "trap");
        let continue_block = self.context.append_basic_block(self.function, "cont");
        self.builder
            .build_conditional_branch(condition, trap_block, continue_block)?;

        self.builder.position_at_end(trap_block);
        let code = self.context.i32_type().const_int(kind.code() as u64, true);
        self.builder
            .build_call(self.trap_handler(), &[code.into()], "")?;
        self.builder
            .build_return(Some(&zero_value(self.context, self.return_type)))?;

        self.builder.position_at_end(continue_block);
        Ok(())
    }

    fn trap_handler(&self) -> FunctionValue<'ctx> {
        self.module.get_function(TRAP_HANDLER).unwrap_or_else(|| {
            let i32_type = self.context.i32_type();
            let fn_type = self.context.void_type().fn_type(&[i32_type.into()], false);
            self.module
                .add_function(TRAP_HANDLER, fn_type, Some(Linkage::External))
        })
    }

    /// 値を指定の型に変換
    fn convert(&self, entry: StackValue<'ctx>, target: ScalarType) -> CodegenResult<BasicValueEnum<'ctx>> {
        if entry.ty == target {
            return Ok(entry.value);
        }

        let widening = target.bit_width() > entry.ty.bit_width();
        let value = match (entry.ty.is_float(), target.is_float()) {
            (false, false) => {
                let v = entry.value.into_int_value();
                let t = self.int_type(target)?;
                if widening {
                    self.builder.build_int_s_extend(v, t, "sext")?.into()
                } else {
                    self.builder.build_int_truncate(v, t, "trunc")?.into()
                }
            }
            (false, true) => {
                let v = entry.value.into_int_value();
                let t = self.float_type(target)?;
                self.builder.build_signed_int_to_float(v, t, "sitofp")?.into()
            }
            (true, false) => {
                let v = entry.value.into_float_value();
                let t = self.int_type(target)?;
                self.builder.build_float_to_signed_int(v, t, "fptosi")?.into()
            }
            (true, true) => {
                let v = entry.value.into_float_value();
                let t = self.float_type(target)?;
                if widening {
                    self.builder.build_float_ext(v, t, "fpext")?.into()
                } else {
                    self.builder.build_float_trunc(v, t, "fptrunc")?.into()
                }
            }
        };

        Ok(value)
    }

    fn pop(&mut self, by: &str) -> CodegenResult<StackValue<'ctx>> {
        self.stack
            .pop()
            .ok_or_else(|| internal(format!("{}: 評価スタックが空です", by)))
    }

    fn slot(&self, id: SlotId) -> CodegenResult<Slot<'ctx>> {
        self.slots
            .get(id.index())
            .copied()
            .ok_or_else(|| internal(format!("未宣言のスロット {}", id)))
    }

    fn int_type(&self, ty: ScalarType) -> CodegenResult<IntType<'ctx>> {
        int_type(self.context, ty).ok_or_else(|| internal(format!("{} は整数型ではありません", ty)))
    }

    fn float_type(&self, ty: ScalarType) -> CodegenResult<FloatType<'ctx>> {
        float_type(self.context, ty)
            .ok_or_else(|| internal(format!("{} は浮動小数点型ではありません", ty)))
    }
}
