//! Token definitions for the lexer
//!
//! This module defines token types and the Token struct.

use tac_common::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token types of the source language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    // Literals
    IntConst(i64),

    Identifier(String),

    // Keywords
    Int,
    Return,

    // Operators
    Equal,          // =
    Plus,           // +
    Minus,          // -
    Star,           // *
    Slash,          // /

    // Delimiters
    LeftParen,      // (
    RightParen,     // )
    Semicolon,      // ;
    Comma,          // ,

    EndOfFile,
}

impl TokenType {
    /// Stable kind name used by the grammar and the token dump
    pub fn kind_name(&self) -> &'static str {
        match self {
            TokenType::IntConst(_) => "IntConst",
            TokenType::Identifier(_) => "id",
            TokenType::Int => "int",
            TokenType::Return => "return",
            TokenType::Equal => "=",
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Star => "*",
            TokenType::Slash => "/",
            TokenType::LeftParen => "(",
            TokenType::RightParen => ")",
            TokenType::Semicolon => "Semicolon",
            TokenType::Comma => ",",
            TokenType::EndOfFile => "$",
        }
    }

    /// Two token types are the same terminal regardless of payload
    pub fn same_kind(&self, other: &TokenType) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::IntConst(n) => write!(f, "{n}"),
            TokenType::Identifier(s) => write!(f, "{s}"),
            TokenType::Semicolon => write!(f, ";"),
            TokenType::EndOfFile => write!(f, "EOF"),
            other => write!(f, "{}", other.kind_name()),
        }
    }
}

/// A token with location information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    /// Source text the token was scanned from
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    /// Token whose lexeme is the canonical spelling of its type
    pub fn new(token_type: TokenType, location: SourceLocation) -> Self {
        let lexeme = match &token_type {
            TokenType::IntConst(n) => n.to_string(),
            TokenType::Identifier(name) => name.clone(),
            TokenType::EndOfFile => String::new(),
            other => other.kind_name().to_string(),
        };
        Self::with_lexeme(token_type, lexeme, location)
    }

    pub fn with_lexeme(token_type: TokenType, lexeme: String, location: SourceLocation) -> Self {
        Self {
            token_type,
            lexeme,
            location,
        }
    }

    /// Literal text for `id` and `IntConst` tokens, empty otherwise
    pub fn text(&self) -> &str {
        match self.token_type {
            TokenType::IntConst(_) | TokenType::Identifier(_) => &self.lexeme,
            _ => "",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.token_type.kind_name(), self.text())
    }
}
