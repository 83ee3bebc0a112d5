//! Semantic analysis
//!
//! Runs alongside IR generation as a second parse observer. It records the
//! declared type of every `int` declaration in the symbol table, rejects a
//! second declaration of the same name and rejects identifiers the table has
//! never heard of.

use crate::grammar::Production;
use crate::lexer::{Token, TokenType};
use crate::parser::ActionObserver;
use log::debug;
use tac_common::{CompilerError, SharedSymbolTable, SourceCodeType, SourceLocation};

/// Synthesized attribute of one parse-stack entry
#[derive(Debug, Clone, PartialEq)]
enum Attribute {
    Type(SourceCodeType),
    Name(String, SourceLocation),
    Empty,
}

#[derive(Default)]
pub struct SemanticAnalyzer {
    table: Option<SharedSymbolTable>,
    stack: Vec<Attribute>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> Result<&SharedSymbolTable, CompilerError> {
        self.table
            .as_ref()
            .ok_or_else(|| CompilerError::internal("semantic analyzer has no symbol table"))
    }

    fn pop(&mut self) -> Result<Attribute, CompilerError> {
        self.stack
            .pop()
            .ok_or_else(|| CompilerError::internal("semantic attribute stack underflow"))
    }
}

impl ActionObserver for SemanticAnalyzer {
    fn set_symbol_table(&mut self, table: SharedSymbolTable) {
        self.table = Some(table);
    }

    fn on_shift(&mut self, token: &Token) -> Result<(), CompilerError> {
        let attribute = match &token.token_type {
            TokenType::Int => Attribute::Type(SourceCodeType::Int),
            TokenType::Identifier(name) => {
                if !self.table()?.borrow().has(name) {
                    return Err(CompilerError::undeclared(name, token.location.clone()));
                }
                Attribute::Name(name.clone(), token.location.clone())
            }
            _ => Attribute::Empty,
        };
        self.stack.push(attribute);
        Ok(())
    }

    fn on_reduce(&mut self, production: Production) -> Result<(), CompilerError> {
        match production {
            Production::Declaration => {
                let name = self.pop()?;
                let ty = self.pop()?;
                match (name, ty) {
                    (Attribute::Name(name, location), Attribute::Type(ty)) => {
                        let table = self.table()?;
                        let mut table = table.borrow_mut();
                        let entry = table
                            .get_mut(&name)
                            .ok_or_else(|| CompilerError::undeclared(&name, location.clone()))?;
                        if entry.ty.is_some() {
                            return Err(CompilerError::semantic_error(
                                format!("Redeclaration of '{}'", name),
                                location,
                            ));
                        }
                        entry.set_type(ty);
                        debug!("declared {} : {}", name, ty);
                    }
                    (name, ty) => {
                        return Err(CompilerError::internal(format!(
                            "malformed declaration attributes: {:?} {:?}",
                            ty, name
                        )));
                    }
                }
                self.stack.push(Attribute::Empty);
            }
            // D -> int: the type attribute of `int` becomes that of D
            Production::IntType => {}
            _ => {
                for _ in 0..production.body().len() {
                    self.pop()?;
                }
                self.stack.push(Attribute::Empty);
            }
        }
        Ok(())
    }

    fn on_accept(&mut self) -> Result<(), CompilerError> {
        Ok(())
    }

    fn stack_depth(&self) -> Option<usize> {
        Some(self.stack.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::SyntaxDriver;
    use tac_common::{SymbolTable, SharedSymbolTable};

    fn analyze(source: &str, table: SymbolTable) -> (Result<(), CompilerError>, SharedSymbolTable) {
        let mut symbols = table;
        let tokens = Lexer::new(source).tokenize(&mut symbols).unwrap();
        let shared = symbols.into_shared();

        let mut analyzer = SemanticAnalyzer::new();
        let result = {
            let mut driver = SyntaxDriver::new(tokens);
            driver.register_observer(&mut analyzer);
            driver.load_symbol_table(&shared);
            driver.run()
        };
        (result, shared)
    }

    #[test]
    fn test_declaration_sets_type() {
        let (result, table) = analyze("int a; int b; a = b; return a;", SymbolTable::new());
        result.unwrap();

        let table = table.borrow();
        assert_eq!(table.get("a").and_then(|e| e.ty), Some(SourceCodeType::Int));
        assert_eq!(table.get("b").and_then(|e| e.ty), Some(SourceCodeType::Int));
    }

    #[test]
    fn test_used_but_never_declared_keeps_no_type() {
        let (result, table) = analyze("int a; a = c; return a;", SymbolTable::new());
        result.unwrap();
        assert_eq!(table.borrow().get("c").and_then(|e| e.ty), None);
    }

    #[test]
    fn test_redeclaration_is_rejected() {
        let (result, table) = analyze("int a;\nint a;\nreturn a;", SymbolTable::new());
        match result.unwrap_err() {
            CompilerError::SemanticError { location, message } => {
                assert_eq!(location.line, 2);
                assert!(message.contains("'a'"), "{message}");
            }
            other => panic!("expected a semantic error, got {other:?}"),
        }
        assert_eq!(table.borrow().get("a").and_then(|e| e.ty), Some(SourceCodeType::Int));
    }

    #[test]
    fn test_unknown_identifier_is_rejected() {
        let tokens = vec![
            Token::new(TokenType::Return, SourceLocation::new_simple(1, 1)),
            Token::new(TokenType::Identifier("y".to_string()), SourceLocation::new_simple(1, 8)),
            Token::new(TokenType::Semicolon, SourceLocation::new_simple(1, 9)),
        ];
        let shared = SymbolTable::new().into_shared();

        let mut analyzer = SemanticAnalyzer::new();
        let mut driver = SyntaxDriver::new(tokens);
        driver.register_observer(&mut analyzer);
        driver.load_symbol_table(&shared);

        let err = driver.run().unwrap_err();
        assert!(matches!(err, CompilerError::UndeclaredIdentifier { ref name, .. } if name == "y"));
    }
}
