//! Three-address code compiler - Target Code Model
//!
//! This crate describes the output side of the compiler:
//!
//! - The register set and instruction subset of the target
//! - Rendering of instruction lists as assembly text

pub mod asm;
pub mod emit;

pub use asm::{AsmInst, Reg};
pub use emit::emit_program;
