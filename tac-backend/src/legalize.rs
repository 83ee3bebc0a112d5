//! Instruction legalization
//!
//! Rewrites the IR into forms the target can encode directly. Literal-only
//! arithmetic is folded, immediates the target cannot take are moved into
//! fresh temporaries first, and `x + imm` is normalized to put the register
//! operand on the left. Everything after the first `return` is dropped.
//!
//! While rewriting, the pass records the last position at which each
//! variable is mentioned. Positions are 1-based indices into the legalized
//! instruction list and are what the register allocator reasons about.

use std::collections::BTreeMap;
use log::{debug, trace};
use tac_common::TempGenerator;
use tac_frontend::ir::{BinaryOp, Instruction, Program, Value, Variable};

/// Variable -> 1-based position of its last textual reference
pub type LastUseTable = BTreeMap<Variable, usize>;

/// Output of the legalizer
#[derive(Debug, Clone, Default)]
pub struct LegalizedProgram {
    instructions: Vec<Instruction>,
    last_use: LastUseTable,
}

impl LegalizedProgram {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn last_use(&self) -> &LastUseTable {
        &self.last_use
    }

    /// Last position at which `var` is mentioned, if it is mentioned at all
    pub fn last_use_of(&self, var: &Variable) -> Option<usize> {
        self.last_use.get(var).copied()
    }

    /// Textual dump, one instruction per line
    pub fn dump(&self) -> String {
        self.instructions
            .iter()
            .map(|instr| format!("{instr}\n"))
            .collect()
    }
}

/// Legalize a whole program
pub fn legalize(program: Program) -> LegalizedProgram {
    let (instructions, temps) = program.into_parts();
    let input_len = instructions.len();

    let mut legalizer = Legalizer::new(temps);
    for instr in instructions {
        let is_return = matches!(instr, Instruction::Return { .. });
        legalizer.legalize_instruction(instr);
        if is_return {
            break;
        }
    }

    let legalized = legalizer.finish();
    debug!(
        "legalized {} IR instructions into {}",
        input_len,
        legalized.instructions.len()
    );
    legalized
}

struct Legalizer {
    temps: TempGenerator,
    out: Vec<Instruction>,
    last_use: LastUseTable,
}

impl Legalizer {
    fn new(temps: TempGenerator) -> Self {
        Self {
            temps,
            out: Vec::new(),
            last_use: LastUseTable::new(),
        }
    }

    fn finish(self) -> LegalizedProgram {
        LegalizedProgram {
            instructions: self.out,
            last_use: self.last_use,
        }
    }

    /// Append an instruction and record every variable it mentions at its position
    fn push(&mut self, instr: Instruction) {
        self.out.push(instr);
        let position = self.out.len();
        let instr = &self.out[position - 1];

        let mentioned = instr
            .result()
            .into_iter()
            .chain(instr.operands().into_iter().filter_map(Value::as_variable));
        for var in mentioned {
            self.last_use.insert(var.clone(), position);
        }
    }

    /// Move `imm` into a fresh temporary, returning the temporary as an operand
    fn materialize(&mut self, imm: i64) -> Value {
        let tmp = Variable::Temp(self.temps.new_temp());
        trace!("materialize {} into {}", imm, tmp);
        self.push(Instruction::mov(tmp.clone(), Value::immediate(imm)));
        tmp.into()
    }

    fn legalize_instruction(&mut self, instr: Instruction) {
        match instr {
            Instruction::Binary { op, result, lhs, rhs } => {
                self.legalize_binary(op, result, lhs, rhs)
            }
            other => self.push(other),
        }
    }

    fn legalize_binary(&mut self, op: BinaryOp, result: Variable, lhs: Value, rhs: Value) {
        match (lhs.as_immediate(), rhs.as_immediate()) {
            (Some(a), Some(b)) => {
                let folded = op.fold(a, b);
                trace!("fold {} {} {} = {}", a, op, b, folded);
                self.push(Instruction::mov(result, Value::immediate(folded)));
            }
            // The multiplier has no immediate form at all
            (Some(imm), None) if op == BinaryOp::Mul => {
                let tmp = self.materialize(imm);
                self.push(Instruction::mul(result, tmp, rhs));
            }
            (None, Some(imm)) if op == BinaryOp::Mul => {
                let tmp = self.materialize(imm);
                self.push(Instruction::mul(result, lhs, tmp));
            }
            // imm - x has no reverse-subtract form
            (Some(imm), None) if op == BinaryOp::Sub => {
                let tmp = self.materialize(imm);
                self.push(Instruction::sub(result, tmp, rhs));
            }
            (Some(_), None) if op.is_commutative() => {
                self.push(Instruction::binary(op, result, rhs, lhs));
            }
            _ => self.push(Instruction::binary(op, result, lhs, rhs)),
        }
    }
}
