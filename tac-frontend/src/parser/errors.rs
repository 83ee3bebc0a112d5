//! Parse error types
//!
//! This module defines all error types that can occur during parsing.

use crate::lexer::{Token, TokenType};
use tac_common::CompilerError;

/// Parse error types specific to the parser
#[derive(Debug, Clone)]
pub enum ParseError {
    UnexpectedToken {
        expected: String,
        found: Token,
    },
}

impl From<ParseError> for CompilerError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnexpectedToken { expected, found } => {
                let what = match found.token_type {
                    TokenType::EndOfFile => "end of file".to_string(),
                    ref other => format!("'{}'", other),
                };
                CompilerError::parse_error(
                    format!("Expected {}, found {}", expected, what),
                    found.location,
                )
            }
        }
    }
}
