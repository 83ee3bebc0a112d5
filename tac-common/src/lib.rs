//! Three-address code compiler - Common Types and Utilities
//!
//! Shared error definitions, source locations, the symbol table and the
//! temporary generator used by every phase of the compiler.

pub mod error;
pub mod types;
pub mod source_loc;

pub use error::CompilerError;
pub use types::*;
pub use source_loc::{SourceLocation, SourceTracker};
