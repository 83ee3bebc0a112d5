//! Common types used throughout the compiler
//!
//! Symbol table storage, declared source types and the temporary-id
//! generator shared by the IR builder and the legalizer.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Temporary variable identifier for IR
pub type TempId = u32;

/// Types a declaration can give to an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceCodeType {
    Int,
}

impl fmt::Display for SourceCodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceCodeType::Int => write!(f, "Int"),
        }
    }
}

/// Symbol table entry
///
/// Created by the lexer the first time an identifier is seen. The type is
/// filled in later, when the semantic analyzer reduces a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub name: String,
    pub ty: Option<SourceCodeType>,
}

impl SymbolEntry {
    pub fn new(name: String) -> Self {
        Self { name, ty: None }
    }

    pub fn set_type(&mut self, ty: SourceCodeType) {
        self.ty = Some(ty);
    }
}

/// Name to entry map for one compilation unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolTable {
    entries: BTreeMap<String, SymbolEntry>,
}

/// The table is shared between the lexer and every parse observer of a
/// single compilation, all on one thread.
pub type SharedSymbolTable = Rc<RefCell<SymbolTable>>;

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedSymbolTable {
        Rc::new(RefCell::new(self))
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Add an entry for `name`; an existing entry is left untouched.
    pub fn add(&mut self, name: &str) -> &mut SymbolEntry {
        self.entries
            .entry(name.to_string())
            .or_insert_with(|| SymbolEntry::new(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SymbolEntry> {
        self.entries.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.values()
    }

    /// One `(name, type)` line per entry, sorted by name
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for entry in self.iter() {
            match entry.ty {
                Some(ty) => out.push_str(&format!("({}, {})\n", entry.name, ty)),
                None => out.push_str(&format!("({}, null)\n", entry.name)),
            }
        }
        out
    }
}

/// Temporary variable generator for IR
///
/// Ids are unique for the lifetime of one generator. A compilation owns
/// exactly one and passes it from phase to phase by value.
#[derive(Debug, Clone, Default)]
pub struct TempGenerator {
    next_id: TempId,
}

impl TempGenerator {
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    /// Generate a new temporary variable ID
    pub fn new_temp(&mut self) -> TempId {
        let temp = self.next_id;
        self.next_id += 1;
        temp
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u32 {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table_add_is_idempotent() {
        let mut table = SymbolTable::new();
        assert!(!table.has("a"));

        table.add("a").set_type(SourceCodeType::Int);
        table.add("a");

        assert!(table.has("a"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a").and_then(|e| e.ty), Some(SourceCodeType::Int));
    }

    #[test]
    fn test_symbol_table_dump_is_sorted() {
        let mut table = SymbolTable::new();
        table.add("result");
        table.add("a").set_type(SourceCodeType::Int);

        assert_eq!(table.dump(), "(a, Int)\n(result, null)\n");
    }

    #[test]
    fn test_temp_generator() {
        let mut gen = TempGenerator::new();

        assert_eq!(gen.new_temp(), 0);
        assert_eq!(gen.new_temp(), 1);
        assert_eq!(gen.new_temp(), 2);
        assert_eq!(gen.issued(), 3);
    }
}
