//! Parse-event observer capability
//!
//! The driver owns no semantics. Everything that happens on a shift, a
//! reduction or on acceptance is delegated to the observers registered with
//! it, in registration order.

use crate::grammar::Production;
use crate::lexer::Token;
use tac_common::{CompilerError, SharedSymbolTable};

pub trait ActionObserver {
    /// Called once, before the first shift
    fn set_symbol_table(&mut self, table: SharedSymbolTable);

    /// A terminal was pushed onto the parse stack
    fn on_shift(&mut self, token: &Token) -> Result<(), CompilerError>;

    /// `production.body().len()` symbols were replaced by its head
    fn on_reduce(&mut self, production: Production) -> Result<(), CompilerError>;

    /// The start production was reduced with nothing left to read
    fn on_accept(&mut self) -> Result<(), CompilerError>;

    /// Depth of the observer's attribute stack, if it keeps one. The driver
    /// checks it against its own stack after every event.
    fn stack_depth(&self) -> Option<usize> {
        None
    }
}
