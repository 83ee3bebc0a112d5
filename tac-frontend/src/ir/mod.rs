//! Three-address code IR
//!
//! ## Architecture
//!
//! - `values` - operands (immediates, named variables, temporaries)
//! - `instructions` - the closed set of instruction forms
//! - `program` - a finished instruction list plus its temporary generator
//! - `generator` - the parse observer that builds a program

pub use self::values::{Value, Variable};
pub use self::instructions::{BinaryOp, Instruction};
pub use self::program::Program;
pub use self::generator::IrGenerator;

mod values;
mod instructions;
mod program;
mod generator;
