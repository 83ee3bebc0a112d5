//! Grammar of the source language
//!
//! ```text
//! P      -> S_list
//! S_list -> S Semicolon S_list | S Semicolon
//! S      -> D id | id = E | return E
//! D      -> int
//! E      -> E + A | E - A | A
//! A      -> A * B | B
//! B      -> ( E ) | id | IntConst
//! ```
//!
//! Observers only ever see [`Production`]s; the body length of each one is
//! the number of attributes an observer must pop on reduction.

use std::fmt;

/// Nonterminals of the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTerminal {
    Program,
    StatementList,
    Statement,
    Declarator,
    Expr,
    Term,
    Factor,
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NonTerminal::Program => "P",
            NonTerminal::StatementList => "S_list",
            NonTerminal::Statement => "S",
            NonTerminal::Declarator => "D",
            NonTerminal::Expr => "E",
            NonTerminal::Term => "A",
            NonTerminal::Factor => "B",
        };
        write!(f, "{name}")
    }
}

/// A grammar symbol as it appears in a production body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Terminal, named by `TokenType::kind_name`
    Terminal(&'static str),
    NonTerminal(NonTerminal),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(name) => write!(f, "{name}"),
            Symbol::NonTerminal(nt) => write!(f, "{nt}"),
        }
    }
}

use NonTerminal as N;
use Symbol::{NonTerminal as Nt, Terminal as T};

/// Productions of the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    /// P -> S_list
    Program,
    /// S_list -> S Semicolon S_list
    StatementList,
    /// S_list -> S Semicolon
    LastStatement,
    /// S -> D id
    Declaration,
    /// D -> int
    IntType,
    /// S -> id = E
    Assign,
    /// S -> return E
    Return,
    /// E -> E + A
    Add,
    /// E -> E - A
    Sub,
    /// E -> A
    ExprTerm,
    /// A -> A * B
    Mul,
    /// A -> B
    TermFactor,
    /// B -> ( E )
    Paren,
    /// B -> id
    FactorId,
    /// B -> IntConst
    FactorConst,
}

impl Production {
    /// Position in the production list, shown in the driver's reduce trace
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn head(&self) -> NonTerminal {
        match self {
            Production::Program => N::Program,
            Production::StatementList | Production::LastStatement => N::StatementList,
            Production::Declaration | Production::Assign | Production::Return => N::Statement,
            Production::IntType => N::Declarator,
            Production::Add | Production::Sub | Production::ExprTerm => N::Expr,
            Production::Mul | Production::TermFactor => N::Term,
            Production::Paren | Production::FactorId | Production::FactorConst => N::Factor,
        }
    }

    pub fn body(&self) -> &'static [Symbol] {
        match self {
            Production::Program => &[Nt(N::StatementList)],
            Production::StatementList => &[Nt(N::Statement), T("Semicolon"), Nt(N::StatementList)],
            Production::LastStatement => &[Nt(N::Statement), T("Semicolon")],
            Production::Declaration => &[Nt(N::Declarator), T("id")],
            Production::IntType => &[T("int")],
            Production::Assign => &[T("id"), T("="), Nt(N::Expr)],
            Production::Return => &[T("return"), Nt(N::Expr)],
            Production::Add => &[Nt(N::Expr), T("+"), Nt(N::Term)],
            Production::Sub => &[Nt(N::Expr), T("-"), Nt(N::Term)],
            Production::ExprTerm => &[Nt(N::Term)],
            Production::Mul => &[Nt(N::Term), T("*"), Nt(N::Factor)],
            Production::TermFactor => &[Nt(N::Factor)],
            Production::Paren => &[T("("), Nt(N::Expr), T(")")],
            Production::FactorId => &[T("id")],
            Production::FactorConst => &[T("IntConst")],
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.head())?;
        for symbol in self.body() {
            write!(f, " {symbol}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_display() {
        assert_eq!(Production::Add.to_string(), "E -> E + A");
        assert_eq!(Production::Paren.to_string(), "B -> ( E )");
        assert_eq!(Production::StatementList.to_string(), "S_list -> S Semicolon S_list");
    }

    #[test]
    fn test_indices_follow_declaration_order() {
        assert_eq!(Production::Program.index(), 0);
        assert_eq!(Production::Declaration.index(), 3);
        assert_eq!(Production::FactorConst.index(), 14);
    }

    #[test]
    fn test_body_lengths() {
        assert_eq!(Production::Program.body().len(), 1);
        assert_eq!(Production::StatementList.body().len(), 3);
        assert_eq!(Production::Return.body().len(), 2);
        assert_eq!(Production::Paren.body().len(), 3);
    }
}
