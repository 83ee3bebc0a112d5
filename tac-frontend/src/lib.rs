//! Three-address code compiler - Frontend
//!
//! This crate provides the frontend components of the compiler:
//! - Lexer: tokenizes source text and seeds the symbol table
//! - Grammar and shift/reduce driver: reports parse events to observers
//! - Semantic analysis: records declared types
//! - IR: the three-address code model and its syntax-directed generator

pub mod lexer;
pub mod grammar;
pub mod parser;
pub mod semantic;
pub mod ir;

pub use lexer::{Lexer, Token, TokenType};
pub use grammar::Production;
pub use parser::{ActionObserver, ParseError, SyntaxDriver};
pub use semantic::SemanticAnalyzer;
pub use ir::{IrGenerator, Program};

use tac_common::{CompilerError, SymbolTable};

/// Everything the frontend knows about one compilation unit
#[derive(Debug, Clone)]
pub struct CompiledUnit {
    pub tokens: Vec<Token>,
    pub symbols: SymbolTable,
    pub program: Program,
}

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Tokenize source code, registering identifiers in `symbols`
    pub fn tokenize(source: &str, symbols: &mut SymbolTable) -> Result<Vec<Token>, CompilerError> {
        Lexer::new(source).tokenize(symbols)
    }

    /// Lex, parse, analyze and generate IR for one source file
    pub fn compile_to_ir(source: &str, filename: &str) -> Result<CompiledUnit, CompilerError> {
        let mut symbols = SymbolTable::new();
        let tokens = Lexer::with_filename(source, filename).tokenize(&mut symbols)?;
        let table = symbols.into_shared();

        let mut semantic = SemanticAnalyzer::new();
        let mut generator = IrGenerator::new();
        {
            let mut driver = SyntaxDriver::new(tokens.clone());
            driver.register_observer(&mut semantic);
            driver.register_observer(&mut generator);
            driver.load_symbol_table(&table);
            driver.run()?;
        }

        let program = generator.into_program()?;
        let symbols = table.borrow().clone();
        Ok(CompiledUnit { tokens, symbols, program })
    }
}
