//! A generated IR program
//!
//! The instruction list of one compilation unit together with the temporary
//! generator that produced its temporaries. Later passes that need fresh
//! temporaries continue from the same generator.

use crate::ir::Instruction;
use tac_common::{CompilerError, TempGenerator};

#[derive(Debug, Clone, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
    temps: TempGenerator,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>, temps: TempGenerator) -> Self {
        Self { instructions, temps }
    }

    /// Instructions in emission order
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_parts(self) -> (Vec<Instruction>, TempGenerator) {
        (self.instructions, self.temps)
    }

    /// Textual dump, one instruction per line
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for instr in &self.instructions {
            out.push_str(&instr.to_string());
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> Result<String, CompilerError> {
        serde_json::to_string_pretty(&self.instructions)
            .map_err(|e| CompilerError::internal(format!("cannot serialize IR: {e}")))
    }
}
