//! Runtime support module for the Wist language.
//!
//! This module JIT-compiles a lowered module in-process and calls its
//! entry function, returning the integer result. Integer faults raised by
//! the generated code are reported through [`wist_trap`].

use crate::backend::{LoweredModule, TrapKind, TRAP_HANDLER};
use crate::codegen::ScalarType;
use crate::error::RuntimeError;
use inkwell::execution_engine::ExecutionEngine;
use inkwell::targets::Target;
use inkwell::OptimizationLevel;
use std::cell::Cell;

thread_local! {
    static TRAP_CODE: Cell<i32> = const { Cell::new(0) };
}

/// Record an integer fault raised by generated code
#[no_mangle]
pub extern "C" fn wist_trap(code: i32) {
    TRAP_CODE.with(|trap| trap.set(code));
}

impl From<TrapKind> for RuntimeError {
    fn from(kind: TrapKind) -> Self {
        match kind {
            TrapKind::DivisionByZero => RuntimeError::DivisionByZero,
            TrapKind::IntegerOverflow => RuntimeError::IntegerOverflow,
        }
    }
}

/// JIT実行環境
#[derive(Debug, Clone, Copy)]
pub struct Runtime {
    opt_level: OptimizationLevel,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(OptimizationLevel::None)
    }
}

impl Runtime {
    pub fn new(opt_level: OptimizationLevel) -> Self {
        Self { opt_level }
    }

    /// エントリ関数を実行し、結果を符号拡張したi64で返す
    ///
    /// 実行エンジンはモジュールを所有するため、同じモジュールは1度しか実行できない。
    pub fn execute(&self, lowered: &LoweredModule<'_>) -> Result<i64, RuntimeError> {
        Target::initialize_native(&Default::default())
            .map_err(|message| RuntimeError::ExecutionEngine { message })?;

        let engine = lowered
            .module()
            .create_jit_execution_engine(self.opt_level)
            .map_err(|e| RuntimeError::ExecutionEngine {
                message: e.to_string(),
            })?;

        if let Some(handler) = lowered.module().get_function(TRAP_HANDLER) {
            engine.add_global_mapping(&handler, wist_trap as extern "C" fn(i32) as usize);
        }

        let name = lowered.entry_name();
        log::debug!("executing {} via JIT", name);
        TRAP_CODE.with(|trap| trap.set(0));

        let result = match lowered.return_type() {
            ScalarType::I8 => i64::from(call_entry::<i8>(&engine, name)?),
            ScalarType::I16 => i64::from(call_entry::<i16>(&engine, name)?),
            ScalarType::I32 => i64::from(call_entry::<i32>(&engine, name)?),
            ScalarType::I64 => call_entry::<i64>(&engine, name)?,
            other => {
                return Err(RuntimeError::UnsupportedReturnType {
                    ty: other.to_string(),
                })
            }
        };

        let code = TRAP_CODE.with(|trap| trap.replace(0));
        if code != 0 {
            log::debug!("{} trapped with code {}", name, code);
            return Err(TrapKind::from_code(code)
                .map(RuntimeError::from)
                .unwrap_or(RuntimeError::UnknownTrap { code }));
        }

        log::debug!("{} returned {}", name, result);
        Ok(result)
    }
}

/// 引数なしのエントリ関数を呼び出す
fn call_entry<R: Copy + 'static>(engine: &ExecutionEngine<'_>, name: &str) -> Result<R, RuntimeError> {
    // SAFETY: エントリ関数は引数を取らず、戻り値型は lowered.return_type() と一致する
    let function = unsafe { engine.get_function::<unsafe extern "C" fn() -> R>(name) }.map_err(|e| {
        RuntimeError::EntryPointNotFound {
            name: name.to_string(),
            message: e.to_string(),
        }
    })?;

    // SAFETY: 生成した関数はスロット以外のメモリに触れず、外部呼び出しは wist_trap のみ
    Ok(unsafe { function.call() })
}
