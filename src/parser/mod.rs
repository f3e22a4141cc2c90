//! Parser module for ghost scripts
//!
//! This module contains the lexer and parser.

pub mod types;
pub mod lexer;
pub mod parser;

// Re-exports
pub use types::{ParseError, ParseErrors};
pub use lexer::{Lexer, LexerError, Token, TokenType};
pub use parser::{parse, Parser};
