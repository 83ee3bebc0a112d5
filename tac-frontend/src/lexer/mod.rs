//! Lexer
//!
//! Turns source text into a finite token stream ending in `EndOfFile`.
//! Identifiers are registered in the symbol table the first time they are
//! seen; their types are filled in later by the semantic analyzer.

pub mod token;

pub use token::{Token, TokenType};

use log::debug;
use tac_common::{CompilerError, SourceTracker, SymbolTable};

/// Lexer state
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    tracker: SourceTracker,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self::with_filename(input, "<input>")
    }

    pub fn with_filename(input: &str, filename: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            tracker: SourceTracker::new(filename),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.position += 1;
        self.tracker.advance(ch);
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn tokenize_word(&mut self) -> TokenType {
        let mut word = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                word.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match word.as_str() {
            "int" => TokenType::Int,
            "return" => TokenType::Return,
            _ => TokenType::Identifier(word),
        }
    }

    fn tokenize_integer(&mut self) -> Result<TokenType, CompilerError> {
        let start = self.tracker.location();
        let mut digits = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // A letter glued to a number is not an identifier either
        if let Some(ch) = self.current_char() {
            if ch.is_ascii_alphabetic() || ch == '_' {
                return Err(CompilerError::lexer_error(
                    format!("Invalid suffix '{}' on integer literal {}", ch, digits),
                    self.tracker.location(),
                ));
            }
        }

        digits
            .parse::<i64>()
            .map(TokenType::IntConst)
            .map_err(|_| {
                CompilerError::lexer_error(
                    format!("Integer literal {} out of range", digits),
                    start,
                )
            })
    }

    /// Get next token
    pub fn next_token(&mut self) -> Result<Token, CompilerError> {
        self.skip_whitespace();

        let location = self.tracker.location();
        let start = self.position;

        let token_type = match self.current_char() {
            None => TokenType::EndOfFile,
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.tokenize_word(),
            Some(ch) if ch.is_ascii_digit() => self.tokenize_integer()?,
            Some(ch) => {
                let token_type = match ch {
                    '=' => TokenType::Equal,
                    '+' => TokenType::Plus,
                    '-' => TokenType::Minus,
                    '*' => TokenType::Star,
                    '/' => TokenType::Slash,
                    '(' => TokenType::LeftParen,
                    ')' => TokenType::RightParen,
                    ';' => TokenType::Semicolon,
                    ',' => TokenType::Comma,
                    other => {
                        return Err(CompilerError::lexer_error(
                            format!("Unexpected character: {}", other),
                            location,
                        ));
                    }
                };
                self.advance();
                token_type
            }
        };

        let lexeme: String = self.input[start..self.position].iter().collect();
        Ok(Token::with_lexeme(token_type, lexeme, location))
    }

    /// Tokenize the whole input, registering identifiers in `symbols`
    pub fn tokenize(&mut self, symbols: &mut SymbolTable) -> Result<Vec<Token>, CompilerError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            if let TokenType::Identifier(name) = &token.token_type {
                if !symbols.has(name) {
                    symbols.add(name);
                }
            }

            let is_eof = matches!(token.token_type, TokenType::EndOfFile);
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        debug!("lexed {} tokens, {} symbols", tokens.len(), symbols.len());
        Ok(tokens)
    }
}
