//! Lowering of legalized IR to target instructions
//!
//! Registers are resolved in a fixed order for every instruction: the
//! destination first, then the operands as they appear in the printed
//! instruction. Changing this order changes which registers get evicted.

use crate::legalize::LegalizedProgram;
use crate::regmgmt::{RegAllocError, RegisterAllocator};
use log::{debug, trace};
use tac_codegen::{AsmInst, Reg};
use tac_frontend::ir::{BinaryOp, Instruction, Value, Variable};

/// Lower every instruction of `program` using registers from `pool`
pub fn lower_program(
    program: &LegalizedProgram,
    pool: &[Reg],
) -> Result<Vec<AsmInst>, RegAllocError> {
    let mut alloc = RegisterAllocator::new(pool.to_vec(), program.last_use())?;
    let mut out = Vec::with_capacity(program.instructions().len());

    for (index, instr) in program.instructions().iter().enumerate() {
        let position = index + 1;
        let inst = lower_instruction(&mut alloc, instr, position)?;
        trace!("{:>3}: {:<16} => {}", position, instr.to_string(), inst);
        out.push(inst);
    }

    debug!(
        "lowered {} instructions using {} of {} registers",
        out.len(),
        alloc.bindings().count(),
        pool.len()
    );
    Ok(out)
}

fn lower_instruction(
    alloc: &mut RegisterAllocator<'_>,
    instr: &Instruction,
    position: usize,
) -> Result<AsmInst, RegAllocError> {
    match instr {
        Instruction::Binary { op, result, lhs, rhs } => {
            lower_binary(alloc, *op, result, lhs, rhs, position)
        }
        Instruction::Move { result, from } => {
            let rd = alloc.resolve_variable(result, position)?;
            match from {
                Value::Immediate(imm) => Ok(AsmInst::Li(rd, *imm)),
                Value::Variable(var) => Ok(AsmInst::Mv(rd, alloc.resolve_variable(var, position)?)),
            }
        }
        Instruction::Return { value } => match value {
            Value::Immediate(imm) => Ok(AsmInst::MvI(Reg::A0, *imm)),
            Value::Variable(var) => {
                Ok(AsmInst::Mv(Reg::A0, alloc.resolve_variable(var, position)?))
            }
        },
    }
}

fn lower_binary(
    alloc: &mut RegisterAllocator<'_>,
    op: BinaryOp,
    result: &Variable,
    lhs: &Value,
    rhs: &Value,
    position: usize,
) -> Result<AsmInst, RegAllocError> {
    let rd = alloc.resolve_variable(result, position)?;

    match op {
        // Printed as `mul rd, rhs, lhs`
        BinaryOp::Mul => {
            let rs = alloc.resolve(rhs, position)?;
            let rt = alloc.resolve(lhs, position)?;
            Ok(AsmInst::Mul(rd, rs, rt))
        }
        BinaryOp::Add | BinaryOp::Sub => {
            let rs = alloc.resolve(lhs, position)?;
            match (op, rhs) {
                (BinaryOp::Add, Value::Immediate(imm)) => Ok(AsmInst::AddI(rd, rs, *imm)),
                (BinaryOp::Sub, Value::Immediate(imm)) => Ok(AsmInst::SubI(rd, rs, *imm)),
                (BinaryOp::Add, rhs) => Ok(AsmInst::Add(rd, rs, alloc.resolve(rhs, position)?)),
                (_, rhs) => Ok(AsmInst::Sub(rd, rs, alloc.resolve(rhs, position)?)),
            }
        }
    }
}
