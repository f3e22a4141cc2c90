//! AST node definitions.
//!
//! A script is a flat list of statements. The only compound form is `if`,
//! whose bodies are plain statement blocks delimited by the surrounding
//! keywords rather than by braces.

use std::fmt;

use crate::parser::lexer::Token;

// =============================================================================
// BASE TYPES
// =============================================================================

/// Position information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number, starting at 1
    pub line: usize,
    /// Column number, starting at 1 (counted in characters)
    pub column: usize,
    /// Byte offset, starting at 0
    pub offset: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// =============================================================================
// STATEMENTS
// =============================================================================

/// Root node: a complete script
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}

/// Union of all statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Command(CommandStmt),
    Block(BlockStmt),
    If(IfStmt),
    /// Placeholder for input the parser could not make sense of.
    Bad,
}

/// A single command invocation: `name arg...`
#[derive(Debug, Clone, PartialEq)]
pub struct CommandStmt {
    pub command: Word,
    pub args: Vec<Word>,
}

impl CommandStmt {
    /// Command word followed by the arguments, in source order.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        std::iter::once(&self.command).chain(self.args.iter())
    }
}

/// A sequence of statements used as an `if` body or terminal `else`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    pub list: Vec<Stmt>,
}

/// `if cond; body [else ...] end`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub cond: CommandStmt,
    pub body: BlockStmt,
    /// Either another `Stmt::If` (else-if chain) or a `Stmt::Block`.
    pub else_branch: Option<Box<Stmt>>,
}

// =============================================================================
// WORDS
// =============================================================================

/// A command name or argument, still in its raw (unexpanded) form.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub token: Token,
}

impl Word {
    pub fn new(token: Token) -> Self {
        Self { token }
    }

    /// Raw literal as scanned, quotes and backslashes included.
    pub fn literal(&self) -> &str {
        &self.token.literal
    }

    pub fn position(&self) -> Position {
        self.token.pos
    }
}

// =============================================================================
// AST FACTORY
// =============================================================================

/// Convenience constructors, mostly useful for building trees by hand.
pub struct AST;

impl AST {
    pub fn program(body: Vec<Stmt>) -> Program {
        Program { body }
    }

    pub fn word(literal: impl Into<String>) -> Word {
        Word::new(Token::string(literal, Position::default()))
    }

    pub fn command(name: &str, args: &[&str]) -> CommandStmt {
        CommandStmt {
            command: Self::word(name),
            args: args.iter().map(|a| Self::word(*a)).collect(),
        }
    }

    pub fn block(list: Vec<Stmt>) -> BlockStmt {
        BlockStmt { list }
    }

    pub fn if_stmt(cond: CommandStmt, body: BlockStmt, else_branch: Option<Stmt>) -> IfStmt {
        IfStmt {
            cond,
            body,
            else_branch: else_branch.map(Box::new),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 14, 40).to_string(), "3:14");
        assert_eq!(Position::default(), Position::new(1, 1, 0));
    }

    #[test]
    fn test_command_words_in_order() {
        let cmd = AST::command("echo", &["a", "b"]);
        let words: Vec<&str> = cmd.words().map(|w| w.literal()).collect();
        assert_eq!(words, vec!["echo", "a", "b"]);
    }
}
