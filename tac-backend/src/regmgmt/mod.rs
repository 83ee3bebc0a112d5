//! Register Management
//!
//! Maps IR variables onto the scratch register pool.
//!
//! ## Architecture
//!
//! - `RegisterAllocator` - public API: resolve an operand to a register
//! - `BiMap` - the variable <-> register binding
//!
//! ## Invariants
//!
//! - A variable is bound to at most one register and a register holds at
//!   most one variable
//! - A binding is only broken once the variable's last use has passed
//! - Allocation decisions depend only on the instruction list, the last-use
//!   table and the pool order

pub use self::allocator::{RegAllocError, RegisterAllocator};
pub use self::bimap::BiMap;

mod allocator;
mod bimap;

#[cfg(test)]
mod tests;
