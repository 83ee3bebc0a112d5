//! Shift/reduce driver
//!
//! Walks the token stream and reports parse events to the registered
//! [`ActionObserver`]s in exactly the order an LR(1) parser for the grammar
//! in [`crate::grammar`] produces them: a handle is reduced as soon as it is
//! complete, left-recursive lists are folded eagerly and the right-recursive
//! statement list is folded once the last statement has been shifted.
//! Expressions are parsed over an explicit stack, so arbitrarily deep
//! parenthesization never recurses.
//!
//! The driver keeps the depth of its own symbol stack and refuses to go on
//! if an observer's attribute stack has drifted from it.

pub mod errors;
pub mod observer;

pub use errors::ParseError;
pub use observer::ActionObserver;

use crate::grammar::Production;
use crate::lexer::{Token, TokenType};
use log::trace;
use tac_common::{CompilerError, SharedSymbolTable, SourceLocation};

/// Drives one parse over a token list
pub struct SyntaxDriver<'o> {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
    observers: Vec<&'o mut dyn ActionObserver>,
    symbol_table_loaded: bool,
}

impl<'o> SyntaxDriver<'o> {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let needs_eof = !matches!(
            tokens.last().map(|t| &t.token_type),
            Some(TokenType::EndOfFile)
        );
        if needs_eof {
            let location = tokens
                .last()
                .map(|t| t.location.clone())
                .unwrap_or_else(SourceLocation::dummy);
            tokens.push(Token::new(TokenType::EndOfFile, location));
        }

        Self {
            tokens,
            position: 0,
            depth: 0,
            observers: Vec::new(),
            symbol_table_loaded: false,
        }
    }

    pub fn register_observer(&mut self, observer: &'o mut dyn ActionObserver) {
        self.observers.push(observer);
    }

    /// Hand the symbol table to every registered observer
    pub fn load_symbol_table(&mut self, table: &SharedSymbolTable) {
        for observer in self.observers.iter_mut() {
            observer.set_symbol_table(table.clone());
        }
        self.symbol_table_loaded = true;
    }

    /// Parse the whole token list, notifying observers along the way
    pub fn run(&mut self) -> Result<(), CompilerError> {
        if !self.symbol_table_loaded {
            return Err(CompilerError::internal(
                "symbol table must be loaded before parsing",
            ));
        }

        self.parse_statement_list()?;
        self.reduce(Production::Program)?;
        self.accept()
    }

    fn peek(&self) -> &Token {
        // `new` guarantees a trailing EndOfFile, which is never consumed
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn check(&self, token_type: &TokenType) -> bool {
        self.peek().token_type.same_kind(token_type)
    }

    fn unexpected(&self, expected: &str) -> CompilerError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.peek().clone(),
        }
        .into()
    }

    fn shift(&mut self) -> Result<(), CompilerError> {
        let token = self.peek().clone();
        if matches!(token.token_type, TokenType::EndOfFile) {
            return Err(self.unexpected("more input"));
        }
        self.position += 1;
        self.depth += 1;
        trace!("shift {}", token);

        for observer in self.observers.iter_mut() {
            observer.on_shift(&token)?;
        }
        self.check_depths()
    }

    fn expect(&mut self, token_type: &TokenType, expected: &str) -> Result<(), CompilerError> {
        if self.check(token_type) {
            self.shift()
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn reduce(&mut self, production: Production) -> Result<(), CompilerError> {
        let arity = production.body().len();
        if self.depth < arity {
            return Err(CompilerError::internal(format!(
                "cannot reduce {} with {} symbols on the stack",
                production, self.depth
            )));
        }
        self.depth = self.depth - arity + 1;
        trace!("reduce #{} {}", production.index(), production);

        for observer in self.observers.iter_mut() {
            observer.on_reduce(production)?;
        }
        self.check_depths()
    }

    fn accept(&mut self) -> Result<(), CompilerError> {
        if !self.check(&TokenType::EndOfFile) || self.depth != 1 {
            return Err(self.unexpected("end of file"));
        }
        trace!("accept");

        for observer in self.observers.iter_mut() {
            observer.on_accept()?;
        }
        Ok(())
    }

    fn check_depths(&self) -> Result<(), CompilerError> {
        for observer in &self.observers {
            if let Some(depth) = observer.stack_depth() {
                if depth != self.depth {
                    return Err(CompilerError::internal(format!(
                        "attribute stack holds {} entries but the parse stack holds {}",
                        depth, self.depth
                    )));
                }
            }
        }
        Ok(())
    }

    /// S_list -> S Semicolon S_list | S Semicolon
    fn parse_statement_list(&mut self) -> Result<(), CompilerError> {
        let mut statements = 0;
        loop {
            self.parse_statement()?;
            self.expect(&TokenType::Semicolon, "';' after statement")?;
            statements += 1;
            if self.check(&TokenType::EndOfFile) {
                break;
            }
        }

        self.reduce(Production::LastStatement)?;
        for _ in 1..statements {
            self.reduce(Production::StatementList)?;
        }
        Ok(())
    }

    /// S -> D id | id = E | return E
    fn parse_statement(&mut self) -> Result<(), CompilerError> {
        let lookahead = self.peek().token_type.clone();
        match lookahead {
            TokenType::Int => {
                self.shift()?;
                self.reduce(Production::IntType)?;
                self.expect(&TokenType::Identifier(String::new()), "identifier in declaration")?;
                self.reduce(Production::Declaration)
            }
            TokenType::Identifier(_) => {
                self.shift()?;
                self.expect(&TokenType::Equal, "'=' in assignment")?;
                self.parse_expr()?;
                self.reduce(Production::Assign)
            }
            TokenType::Return => {
                self.shift()?;
                self.parse_expr()?;
                self.reduce(Production::Return)
            }
            _ => Err(self.unexpected("statement")),
        }
    }

    /// E -> E + A | E - A | A
    /// A -> A * B | B
    /// B -> ( E ) | id | IntConst
    ///
    /// Shift/reduce over an explicit stack of expression symbols, so nesting
    /// depth is bounded by memory rather than by the call stack.
    fn parse_expr(&mut self) -> Result<(), CompilerError> {
        use ExprSymbol as X;

        let mut stack: Vec<ExprSymbol> = Vec::new();
        loop {
            match stack.last().copied() {
                Some(X::Factor) => {
                    stack.pop();
                    if stack.ends_with(&[X::Term, X::Star]) {
                        stack.truncate(stack.len() - 2);
                        self.reduce(Production::Mul)?;
                    } else {
                        self.reduce(Production::TermFactor)?;
                    }
                    stack.push(X::Term);
                }
                Some(X::Term) => {
                    if self.check(&TokenType::Star) {
                        self.shift()?;
                        stack.push(X::Star);
                        continue;
                    }
                    stack.pop();
                    let production = if stack.ends_with(&[X::Expr, X::Plus]) {
                        Production::Add
                    } else if stack.ends_with(&[X::Expr, X::Minus]) {
                        Production::Sub
                    } else {
                        Production::ExprTerm
                    };
                    if production != Production::ExprTerm {
                        stack.truncate(stack.len() - 2);
                    }
                    self.reduce(production)?;
                    stack.push(X::Expr);
                }
                Some(X::Expr) => {
                    let operator = match self.peek().token_type {
                        TokenType::Plus => Some(X::Plus),
                        TokenType::Minus => Some(X::Minus),
                        _ => None,
                    };
                    if let Some(operator) = operator {
                        self.shift()?;
                        stack.push(operator);
                        continue;
                    }

                    stack.pop();
                    match stack.last().copied() {
                        None => return Ok(()),
                        Some(X::Open) => {
                            self.expect(&TokenType::RightParen, "')'")?;
                            stack.pop();
                            self.reduce(Production::Paren)?;
                            stack.push(X::Factor);
                        }
                        Some(other) => {
                            return Err(CompilerError::internal(format!(
                                "expression stack has {:?} below a complete expression",
                                other
                            )));
                        }
                    }
                }
                // Start of an operand: nothing yet, or after an operator or `(`
                None | Some(X::Open | X::Plus | X::Minus | X::Star) => {
                    let leaf = match self.peek().token_type {
                        TokenType::LeftParen => None,
                        TokenType::Identifier(_) => Some(Production::FactorId),
                        TokenType::IntConst(_) => Some(Production::FactorConst),
                        _ => return Err(self.unexpected("expression")),
                    };
                    self.shift()?;
                    match leaf {
                        Some(production) => {
                            self.reduce(production)?;
                            stack.push(X::Factor);
                        }
                        None => stack.push(X::Open),
                    }
                }
            }
        }
    }
}

/// Expression-level entries of the parse stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExprSymbol {
    Open,
    Plus,
    Minus,
    Star,
    Expr,
    Term,
    Factor,
}
