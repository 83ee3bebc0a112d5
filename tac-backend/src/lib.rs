//! Three-address code compiler - Backend
//!
//! This crate turns the IR produced by the frontend into target
//! instructions: legalization, register allocation and lowering.

pub mod legalize;
pub mod lower;
pub mod regmgmt;

pub use legalize::{legalize, LastUseTable, LegalizedProgram};
pub use lower::lower_program;
pub use regmgmt::{RegAllocError, RegisterAllocator};

use log::debug;
use serde::Deserialize;
use tac_codegen::{AsmInst, Reg};
use tac_common::CompilerError;
use tac_frontend::ir::Program;

/// Options for lowering
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoweringOptions {
    /// Scratch registers available to the allocator, in preference order
    pub registers: Vec<Reg>,
}

impl Default for LoweringOptions {
    fn default() -> Self {
        Self {
            registers: Reg::SCRATCH.to_vec(),
        }
    }
}

impl LoweringOptions {
    /// The first `count` scratch registers
    pub fn with_register_count(count: usize) -> Result<Self, CompilerError> {
        if count == 0 || count > Reg::SCRATCH.len() {
            return Err(CompilerError::codegen_error(format!(
                "register count must be between 1 and {}, got {}",
                Reg::SCRATCH.len(),
                count
            )));
        }
        Ok(Self {
            registers: Reg::SCRATCH[..count].to_vec(),
        })
    }

    /// Parse options from a JSON document such as `{"registers": ["t0", "t1"]}`
    pub fn from_json(text: &str) -> Result<Self, CompilerError> {
        serde_json::from_str(text)
            .map_err(|e| CompilerError::codegen_error(format!("invalid lowering options: {e}")))
    }
}

/// Legalize and lower a program
pub fn compile_program(
    program: Program,
    options: &LoweringOptions,
) -> Result<Vec<AsmInst>, CompilerError> {
    let legalized = legalize(program);
    debug!(
        "lowering {} instructions with pool [{}]",
        legalized.instructions().len(),
        options
            .registers
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(lower_program(&legalized, &options.registers)?)
}
