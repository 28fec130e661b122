//! LLVM backend for the Wist language.
//!
//! This module lowers a compiled instruction sequence into a single LLVM
//! function and exposes the resulting module as IR text, `.ll`, assembly
//! or object files.
//!
//! Signed division and remainder are guarded. A zero divisor or `MIN / -1`
//! calls the external [`TRAP_HANDLER`] with a [`TrapKind`] code and returns
//! zero from the entry function; the runtime maps the code to an error.

mod llvm_types;
mod lowering;
mod target;

use crate::codegen::{CompiledFunction, ScalarType};
use crate::error::{CodegenError, CodegenResult};
use inkwell::builder::Builder;
use inkwell::context::Context as LLVMContext;
use inkwell::module::Module;

use lowering::FunctionLowering;

/// Symbol of the runtime hook called when an integer operation faults.
pub const TRAP_HANDLER: &str = "wist_trap";

/// Fault codes passed to [`TRAP_HANDLER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TrapKind {
    DivisionByZero = 1,
    IntegerOverflow = 2,
}

impl TrapKind {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(TrapKind::DivisionByZero),
            2 => Some(TrapKind::IntegerOverflow),
            _ => None,
        }
    }
}

/// Main LLVM backend structure
pub struct LlvmBackend<'ctx> {
    context: &'ctx LLVMContext,
    module: Module<'ctx>,
    builder: Builder<'ctx>,
}

impl<'ctx> LlvmBackend<'ctx> {
    pub fn new(context: &'ctx LLVMContext, module_name: &str) -> Self {
        Self {
            context,
            module: context.create_module(module_name),
            builder: context.create_builder(),
        }
    }

    /// Lower a compiled function into a verified LLVM module.
    pub fn lower(self, function: &CompiledFunction) -> CodegenResult<LoweredModule<'ctx>> {
        log::debug!(
            "lowering {} ({} instructions) to LLVM",
            function.name,
            function.instructions.len()
        );

        let return_type = llvm_types::int_type(self.context, function.return_type).ok_or_else(|| {
            CodegenError::Internal {
                message: format!("戻り値型 {} は整数型ではありません", function.return_type),
            }
        })?;
        let fn_type = return_type.fn_type(&[], false);
        let llvm_function = self.module.add_function(&function.name, fn_type, None);

        FunctionLowering::new(
            self.context,
            &self.module,
            &self.builder,
            llvm_function,
            function.return_type,
        )
        .lower(function)?;

        self.module.verify().map_err(|e| CodegenError::Internal {
            message: format!("Function verification failed: {}: {}", function.name, e),
        })?;

        Ok(LoweredModule {
            module: self.module,
            entry: function.name.clone(),
            return_type: function.return_type,
        })
    }
}

/// A verified LLVM module holding exactly one entry function.
pub struct LoweredModule<'ctx> {
    module: Module<'ctx>,
    entry: String,
    return_type: ScalarType,
}

impl<'ctx> LoweredModule<'ctx> {
    pub fn module(&self) -> &Module<'ctx> {
        &self.module
    }

    /// Name of the entry function
    pub fn entry_name(&self) -> &str {
        &self.entry
    }

    pub fn return_type(&self) -> ScalarType {
        self.return_type
    }

    /// Textual LLVM IR
    pub fn ir(&self) -> String {
        self.module.print_to_string().to_string()
    }
}
