//! IR Instructions
//!
//! Three-address code: every instruction has at most one operator, up to
//! two source operands and one destination.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::ir::{Value, Variable};

/// Arithmetic operators of binary instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
}

impl BinaryOp {
    /// Evaluate the operator on two literals with two's-complement wrapping
    pub fn fold(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            BinaryOp::Add => lhs.wrapping_add(rhs),
            BinaryOp::Sub => lhs.wrapping_sub(rhs),
            BinaryOp::Mul => lhs.wrapping_mul(rhs),
        }
    }

    pub fn is_commutative(self) -> bool {
        matches!(self, BinaryOp::Add | BinaryOp::Mul)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
        }
    }
}

/// IR Instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// result = lhs op rhs
    Binary {
        op: BinaryOp,
        result: Variable,
        lhs: Value,
        rhs: Value,
    },

    /// result = from
    Move {
        result: Variable,
        from: Value,
    },

    /// return value
    Return {
        value: Value,
    },
}

impl Instruction {
    pub fn binary(op: BinaryOp, result: Variable, lhs: Value, rhs: Value) -> Self {
        Instruction::Binary { op, result, lhs, rhs }
    }

    pub fn add(result: Variable, lhs: Value, rhs: Value) -> Self {
        Self::binary(BinaryOp::Add, result, lhs, rhs)
    }

    pub fn sub(result: Variable, lhs: Value, rhs: Value) -> Self {
        Self::binary(BinaryOp::Sub, result, lhs, rhs)
    }

    pub fn mul(result: Variable, lhs: Value, rhs: Value) -> Self {
        Self::binary(BinaryOp::Mul, result, lhs, rhs)
    }

    pub fn mov(result: Variable, from: Value) -> Self {
        Instruction::Move { result, from }
    }

    pub fn ret(value: Value) -> Self {
        Instruction::Return { value }
    }

    /// Destination of the instruction, if it writes one
    pub fn result(&self) -> Option<&Variable> {
        match self {
            Instruction::Binary { result, .. } | Instruction::Move { result, .. } => Some(result),
            Instruction::Return { .. } => None,
        }
    }

    /// Operands read by the instruction, left to right
    pub fn operands(&self) -> Vec<&Value> {
        match self {
            Instruction::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            Instruction::Move { from, .. } => vec![from],
            Instruction::Return { value } => vec![value],
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Binary { op, result, lhs, rhs } => {
                write!(f, "{result} = {lhs} {op} {rhs}")
            }
            Instruction::Move { result, from } => write!(f, "{result} = {from}"),
            Instruction::Return { value } => write!(f, "return {value}"),
        }
    }
}
