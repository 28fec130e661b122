//! ネイティブターゲット向けの出力

use crate::error::{CodegenError, CodegenResult};
use inkwell::targets::{CodeModel, FileType, RelocMode, Target, TargetMachine};
use inkwell::OptimizationLevel;
use std::path::Path;

use super::LoweredModule;

impl<'ctx> LoweredModule<'ctx> {
    /// Write LLVM IR to file
    pub fn write_llvm_ir(&self, path: &Path) -> CodegenResult<()> {
        self.module
            .print_to_file(path)
            .map_err(|e| CodegenError::Internal {
                message: format!("Failed to write LLVM IR: {}", e),
            })
    }

    /// Write object file
    pub fn write_object_file(&self, path: &Path, opt_level: OptimizationLevel) -> CodegenResult<()> {
        self.write_native(path, FileType::Object, opt_level)
    }

    /// Write assembly file
    pub fn write_assembly(&self, path: &Path, opt_level: OptimizationLevel) -> CodegenResult<()> {
        self.write_native(path, FileType::Assembly, opt_level)
    }

    fn write_native(&self, path: &Path, file_type: FileType, opt_level: OptimizationLevel) -> CodegenResult<()> {
        let target_machine = native_target_machine(opt_level)?;
        self.module.set_triple(&target_machine.get_triple());
        self.module
            .set_data_layout(&target_machine.get_target_data().get_data_layout());

        log::debug!("writing native output to {}", path.display());
        target_machine
            .write_to_file(&self.module, file_type, path)
            .map_err(|e| CodegenError::Internal {
                message: format!("Failed to write {}: {}", path.display(), e),
            })
    }
}

/// ホスト向けのターゲットマシンを作成
fn native_target_machine(opt_level: OptimizationLevel) -> CodegenResult<TargetMachine> {
    Target::initialize_native(&Default::default()).map_err(|e| CodegenError::LLVMInit {
        message: format!("Failed to initialize native target: {}", e),
    })?;

    let target_triple = TargetMachine::get_default_triple();
    let target = Target::from_triple(&target_triple).map_err(|e| CodegenError::LLVMInit {
        message: format!("Failed to get target: {}", e),
    })?;

    target
        .create_target_machine(
            &target_triple,
            "generic",
            "",
            opt_level,
            RelocMode::PIC,
            CodeModel::Default,
        )
        .ok_or_else(|| CodegenError::LLVMInit {
            message: "Failed to create target machine".to_string(),
        })
}
