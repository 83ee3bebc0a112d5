//! Target Instruction Definitions
//!
//! This module defines the register model and the instruction subset used for
//! straight-line arithmetic on the RISC-V-like target.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target register set
///
/// Only the registers the compiler ever names are modelled:
/// - T0-T6: caller-saved scratch registers, the allocation pool
/// - A0: return value register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reg {
    T0, T1, T2, T3, T4, T5, T6,
    A0,
}

impl Reg {
    /// Scratch registers in preference order
    pub const SCRATCH: [Reg; 7] = [Reg::T0, Reg::T1, Reg::T2, Reg::T3, Reg::T4, Reg::T5, Reg::T6];

    pub fn is_scratch(&self) -> bool {
        !matches!(self, Reg::A0)
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reg::T0 => write!(f, "t0"),
            Reg::T1 => write!(f, "t1"),
            Reg::T2 => write!(f, "t2"),
            Reg::T3 => write!(f, "t3"),
            Reg::T4 => write!(f, "t4"),
            Reg::T5 => write!(f, "t5"),
            Reg::T6 => write!(f, "t6"),
            Reg::A0 => write!(f, "a0"),
        }
    }
}

/// Target instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmInst {
    // Arithmetic
    Add(Reg, Reg, Reg),           // rd = rs + rt
    Sub(Reg, Reg, Reg),           // rd = rs - rt
    Mul(Reg, Reg, Reg),           // rd = rs * rt

    // Arithmetic with immediate
    AddI(Reg, Reg, i64),          // rd = rs + imm
    SubI(Reg, Reg, i64),          // rd = rs - imm

    // Data movement
    Li(Reg, i64),                 // rd = imm
    Mv(Reg, Reg),                 // rd = rs
    MvI(Reg, i64),                // rd = imm, spelled as a move
}

impl fmt::Display for AsmInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmInst::Add(rd, rs, rt) => write!(f, "add {}, {}, {}", rd, rs, rt),
            AsmInst::Sub(rd, rs, rt) => write!(f, "sub {}, {}, {}", rd, rs, rt),
            AsmInst::Mul(rd, rs, rt) => write!(f, "mul {}, {}, {}", rd, rs, rt),
            AsmInst::AddI(rd, rs, imm) => write!(f, "addi {}, {}, {}", rd, rs, imm),
            AsmInst::SubI(rd, rs, imm) => write!(f, "subi {}, {}, {}", rd, rs, imm),
            AsmInst::Li(rd, imm) => write!(f, "li {}, {}", rd, imm),
            AsmInst::Mv(rd, rs) => write!(f, "mv {}, {}", rd, rs),
            AsmInst::MvI(rd, imm) => write!(f, "mv {}, {}", rd, imm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_names() {
        let names: Vec<String> = Reg::SCRATCH.iter().map(|r| r.to_string()).collect();
        assert_eq!(names, ["t0", "t1", "t2", "t3", "t4", "t5", "t6"]);
        assert_eq!(Reg::A0.to_string(), "a0");
        assert!(!Reg::A0.is_scratch());
        assert!(Reg::SCRATCH.iter().all(Reg::is_scratch));
    }

    #[test]
    fn test_instruction_display() {
        assert_eq!(AsmInst::Add(Reg::T1, Reg::T0, Reg::T2).to_string(), "add t1, t0, t2");
        assert_eq!(AsmInst::SubI(Reg::T3, Reg::T4, -7).to_string(), "subi t3, t4, -7");
        assert_eq!(AsmInst::Li(Reg::T0, 6).to_string(), "li t0, 6");
        assert_eq!(AsmInst::Mv(Reg::A0, Reg::T2).to_string(), "mv a0, t2");
        assert_eq!(AsmInst::MvI(Reg::A0, 0).to_string(), "mv a0, 0");
    }

    #[test]
    fn test_register_names_deserialize() {
        let regs: Vec<Reg> = serde_json::from_str(r#"["t0", "t5", "a0"]"#).unwrap();
        assert_eq!(regs, vec![Reg::T0, Reg::T5, Reg::A0]);
        assert!(serde_json::from_str::<Reg>(r#""r9""#).is_err());
    }
}
