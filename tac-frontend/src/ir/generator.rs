//! Syntax-directed IR generation
//!
//! [`IrGenerator`] is a parse observer. It keeps one attribute per parse
//! stack entry (`None` for entries without a value, such as punctuation or
//! whole statements) and emits three-address code on the reductions that
//! compute something.

use crate::grammar::Production;
use crate::ir::{BinaryOp, Instruction, Program, Value, Variable};
use crate::lexer::{Token, TokenType};
use crate::parser::ActionObserver;
use log::{debug, trace};
use tac_common::{CompilerError, SharedSymbolTable, TempGenerator};

#[derive(Default)]
pub struct IrGenerator {
    table: Option<SharedSymbolTable>,
    stack: Vec<Option<Value>>,
    instructions: Vec<Instruction>,
    temps: TempGenerator,
    accepted: bool,
}

impl IrGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A temporary never handed out before in this compilation
    pub fn fresh_temporary(&mut self) -> Variable {
        Variable::Temp(self.temps.new_temp())
    }

    /// Instructions emitted so far, in emission order
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn is_complete(&self) -> bool {
        self.accepted
    }

    /// The finished program; only available once the parse was accepted
    pub fn into_program(self) -> Result<Program, CompilerError> {
        if !self.accepted {
            return Err(CompilerError::internal(
                "IR requested before the parse was accepted",
            ));
        }
        Ok(Program::new(self.instructions, self.temps))
    }

    fn emit(&mut self, instr: Instruction) {
        trace!("emit {}", instr);
        self.instructions.push(instr);
    }

    fn pop(&mut self) -> Result<Option<Value>, CompilerError> {
        self.stack
            .pop()
            .ok_or_else(|| CompilerError::internal("IR attribute stack underflow"))
    }

    fn pop_value(&mut self, what: &str) -> Result<Value, CompilerError> {
        self.pop()?
            .ok_or_else(|| CompilerError::internal(format!("missing value for {what}")))
    }

    fn reduce_binary(&mut self, op: BinaryOp) -> Result<(), CompilerError> {
        let rhs = self.pop_value("right operand")?;
        self.pop()?;
        let lhs = self.pop_value("left operand")?;

        let result = self.fresh_temporary();
        self.emit(Instruction::binary(op, result.clone(), lhs, rhs));
        self.stack.push(Some(result.into()));
        Ok(())
    }
}

impl ActionObserver for IrGenerator {
    fn set_symbol_table(&mut self, table: SharedSymbolTable) {
        self.table = Some(table);
    }

    fn on_shift(&mut self, token: &Token) -> Result<(), CompilerError> {
        let attribute = match &token.token_type {
            TokenType::IntConst(value) => Some(Value::immediate(*value)),
            TokenType::Identifier(name) => {
                let table = self
                    .table
                    .as_ref()
                    .ok_or_else(|| CompilerError::internal("IR generator has no symbol table"))?;
                if !table.borrow().has(name) {
                    return Err(CompilerError::undeclared(name, token.location.clone()));
                }
                Some(Variable::named(name.as_str()).into())
            }
            _ => None,
        };
        self.stack.push(attribute);
        Ok(())
    }

    fn on_reduce(&mut self, production: Production) -> Result<(), CompilerError> {
        match production {
            Production::Assign => {
                let value = self.pop_value("assigned expression")?;
                self.pop()?;
                let dest = match self.pop_value("assignment target")? {
                    Value::Variable(var) => var,
                    Value::Immediate(n) => {
                        return Err(CompilerError::internal(format!(
                            "assignment target is the literal {n}"
                        )));
                    }
                };
                self.emit(Instruction::mov(dest, value));
                self.stack.push(None);
            }
            Production::Return => {
                let value = self.pop_value("returned expression")?;
                self.pop()?;
                self.emit(Instruction::ret(value));
                self.stack.push(None);
            }
            Production::Add => self.reduce_binary(BinaryOp::Add)?,
            Production::Sub => self.reduce_binary(BinaryOp::Sub)?,
            Production::Mul => self.reduce_binary(BinaryOp::Mul)?,
            Production::Paren => {
                self.pop()?;
                let value = self.pop_value("parenthesized expression")?;
                self.pop()?;
                self.stack.push(Some(value));
            }
            // Unit productions: the child's attribute becomes the head's
            Production::ExprTerm
            | Production::TermFactor
            | Production::FactorId
            | Production::FactorConst => {}
            _ => {
                for _ in 0..production.body().len() {
                    self.pop()?;
                }
                self.stack.push(None);
            }
        }
        Ok(())
    }

    fn on_accept(&mut self) -> Result<(), CompilerError> {
        self.accepted = true;
        debug!(
            "IR generation complete: {} instructions, {} temporaries",
            self.instructions.len(),
            self.temps.issued()
        );
        Ok(())
    }

    fn stack_depth(&self) -> Option<usize> {
        Some(self.stack.len())
    }
}
