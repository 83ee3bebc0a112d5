//! IR Value Representations
//!
//! Operands of IR instructions: immediates and variables. Variables are
//! either named by the source program or compiler temporaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use tac_common::TempId;

/// A storage location the IR can write to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variable {
    /// Source-level identifier; always present in the symbol table
    Named(String),

    /// Compiler temporary, unique within one compilation
    Temp(TempId),
}

impl Variable {
    pub fn named(name: impl Into<String>) -> Self {
        Variable::Named(name.into())
    }

    pub fn is_temp(&self) -> bool {
        matches!(self, Variable::Temp(_))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Named(name) => write!(f, "{name}"),
            Variable::Temp(id) => write!(f, "${id}"),
        }
    }
}

/// IR Value - represents operands in IR instructions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Immediate(i64),
    Variable(Variable),
}

impl Value {
    pub fn immediate(value: i64) -> Self {
        Value::Immediate(value)
    }

    pub fn as_immediate(&self) -> Option<i64> {
        match self {
            Value::Immediate(value) => Some(*value),
            Value::Variable(_) => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Value::Variable(var) => Some(var),
            Value::Immediate(_) => None,
        }
    }
}

impl From<Variable> for Value {
    fn from(var: Variable) -> Self {
        Value::Variable(var)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Immediate(value) => write!(f, "{value}"),
            Value::Variable(var) => write!(f, "{var}"),
        }
    }
}
