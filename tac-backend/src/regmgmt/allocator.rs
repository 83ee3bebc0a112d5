//! Last-use register allocator
//!
//! Variables are bound to pool registers on first sight and keep them until
//! the register is needed by someone else. A register is only taken from a
//! variable whose last use lies strictly before the current position, so a
//! value is never lost while it is still needed. There is no spilling: when
//! every register holds a live variable, allocation fails.

use super::bimap::BiMap;
use crate::legalize::LastUseTable;
use log::trace;
use tac_codegen::Reg;
use tac_common::CompilerError;
use tac_frontend::ir::{Value, Variable};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegAllocError {
    #[error("Immediate {0} cannot be assigned a register")]
    IllegalImmediate(i64),

    #[error("No register available for {variable} at instruction {position}")]
    OutOfRegisters { position: usize, variable: String },

    #[error("Register pool is empty")]
    EmptyPool,

    #[error("Register {0} cannot be used for allocation")]
    InvalidRegister(Reg),

    #[error("Register {0} appears more than once in the pool")]
    DuplicateRegister(Reg),
}

impl From<RegAllocError> for CompilerError {
    fn from(err: RegAllocError) -> Self {
        CompilerError::codegen_error(err.to_string())
    }
}

pub struct RegisterAllocator<'a> {
    /// Allocatable registers in preference order
    pool: Vec<Reg>,

    last_use: &'a LastUseTable,

    /// Variable <-> register binding
    bindings: BiMap<Variable, Reg>,
}

impl<'a> RegisterAllocator<'a> {
    pub fn new(pool: Vec<Reg>, last_use: &'a LastUseTable) -> Result<Self, RegAllocError> {
        if pool.is_empty() {
            return Err(RegAllocError::EmptyPool);
        }
        for (i, reg) in pool.iter().enumerate() {
            if !reg.is_scratch() {
                return Err(RegAllocError::InvalidRegister(*reg));
            }
            if pool[..i].contains(reg) {
                return Err(RegAllocError::DuplicateRegister(*reg));
            }
        }

        Ok(Self {
            pool,
            last_use,
            bindings: BiMap::new(),
        })
    }

    /// Register for an operand at `position`; immediates never get one
    pub fn resolve(&mut self, value: &Value, position: usize) -> Result<Reg, RegAllocError> {
        match value {
            Value::Variable(var) => self.resolve_variable(var, position),
            Value::Immediate(imm) => Err(RegAllocError::IllegalImmediate(*imm)),
        }
    }

    /// Register for a variable at `position`, binding one if necessary
    pub fn resolve_variable(
        &mut self,
        var: &Variable,
        position: usize,
    ) -> Result<Reg, RegAllocError> {
        if let Some(&reg) = self.bindings.get_by_left(var) {
            return Ok(reg);
        }

        if let Some(reg) = self.first_free() {
            trace!("  {} -> {} (free)", var, reg);
            self.bindings.insert(var.clone(), reg);
            return Ok(reg);
        }

        if let Some(reg) = self.first_dead(position) {
            if let Some(victim) = self.bindings.get_by_right(&reg) {
                trace!("  {} -> {} (evicts {})", var, reg, victim);
            }
            self.bindings.insert(var.clone(), reg);
            return Ok(reg);
        }

        Err(RegAllocError::OutOfRegisters {
            position,
            variable: var.to_string(),
        })
    }

    /// Register currently bound to `var`
    pub fn register_of(&self, var: &Variable) -> Option<Reg> {
        self.bindings.get_by_left(var).copied()
    }

    /// Current bindings in variable order
    pub fn bindings(&self) -> impl Iterator<Item = (&Variable, &Reg)> {
        self.bindings.iter()
    }

    fn first_free(&self) -> Option<Reg> {
        self.pool
            .iter()
            .copied()
            .find(|reg| !self.bindings.contains_right(reg))
    }

    /// First register, in pool order, whose variable is not mentioned again
    fn first_dead(&self, position: usize) -> Option<Reg> {
        self.pool.iter().copied().find(|reg| {
            self.bindings
                .get_by_right(reg)
                .map(|holder| self.last_use.get(holder).map_or(true, |&last| last < position))
                .unwrap_or(false)
        })
    }

    #[cfg(test)]
    pub(super) fn bindings_consistent(&self) -> bool {
        self.bindings.is_consistent()
    }
}
