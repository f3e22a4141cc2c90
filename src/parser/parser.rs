//! Recursive Descent Parser for Ghost Scripts
//!
//! The parser pulls tokens from the lexer on demand, keeping exactly one token
//! of lookahead, and produces a `Program`.
//!
//! Grammar:
//!   program      ::= block EOF
//!   block        ::= (TERMINATOR | statement)*      stops at "end", "else", EOF
//!   statement    ::= if_stmt | command_stmt
//!   if_stmt      ::= "if" command_stmt block
//!                    ("else" ("if" if_stmt | TERMINATOR block))? "end" TERMINATOR
//!   command_stmt ::= word word* TERMINATOR
//!
//! Errors never stop the parse. A statement that cannot be parsed becomes
//! `Stmt::Bad` and the parser moves on by at least one token, so every error
//! in the script is reported in a single pass. The one exception is nesting
//! deeper than `MAX_PARSER_DEPTH`: that error is reported alone and the rest
//! of the input is discarded.

use crate::ast::types::{BlockStmt, CommandStmt, IfStmt, Position, Program, Stmt, Word};
use crate::parser::lexer::{Lexer, Token, TokenType};
use crate::parser::types::{
    ParseError, ParseErrors, KEYWORD_ELSE, KEYWORD_END, KEYWORD_IF, MAX_PARSER_DEPTH,
};

/// Parse a script, failing with every collected error if there were any.
pub fn parse(input: &str) -> Result<Program, ParseErrors> {
    let (program, errors) = Parser::new(input).parse_program();
    if errors.is_empty() {
        Ok(program)
    } else {
        Err(ParseErrors(errors))
    }
}

/// Main parser struct
pub struct Parser {
    lexer: Lexer,
    /// One token look-ahead
    current: Token,
    errors: Vec<ParseError>,
    /// Number of `if` statements currently open
    depth: usize,
    /// Set once nesting went past `MAX_PARSER_DEPTH`
    too_deep: bool,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        let mut parser = Self {
            lexer: Lexer::new(input),
            current: Token::new(TokenType::Eof, "", Position::default()),
            errors: Vec::new(),
            depth: 0,
            too_deep: false,
        };
        parser.advance();
        parser
    }

    /// Parse the whole input. The program is returned even when errors were
    /// found; callers must not evaluate it in that case.
    pub fn parse_program(mut self) -> (Program, Vec<ParseError>) {
        let mut body = Vec::new();
        loop {
            self.parse_statements(&mut body);
            if self.current.is(TokenType::Eof) {
                break;
            }
            // Only a stray `end` or `else` stops a top-level block early.
            let message = format!("unexpected {:?}", self.current.literal);
            self.error(message);
            self.advance();
            body.push(Stmt::Bad);
        }
        (Program { body }, self.errors)
    }

    /// Move to the next token, returning the one just consumed.
    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        self.errors
            .extend(self.lexer.take_errors().into_iter().map(ParseError::from));
        std::mem::replace(&mut self.current, next)
    }

    fn error(&mut self, message: impl Into<String>) {
        if self.too_deep {
            return;
        }
        self.errors.push(ParseError::new(message, self.current.pos));
    }

    fn describe_current(&self) -> String {
        match self.current.token_type {
            TokenType::String => format!("{:?}", self.current.literal),
            other => other.to_string(),
        }
    }

    /// Skip the current token unless it is EOF, so recovery always progresses.
    fn skip(&mut self) {
        if !self.current.is(TokenType::Eof) {
            self.advance();
        }
    }

    fn expect(&mut self, token_type: TokenType) -> bool {
        if self.current.is(token_type) {
            self.advance();
            return true;
        }
        let message = format!(
            "expected next token to be {}, got {} instead",
            token_type,
            self.describe_current()
        );
        self.error(message);
        self.skip();
        false
    }

    fn expect_keyword(&mut self, keyword: &str) -> bool {
        if self.current.is_keyword(keyword) {
            self.advance();
            return true;
        }
        let message = format!(
            "expected next token to be {:?}, got {} instead",
            keyword,
            self.describe_current()
        );
        self.error(message);
        self.skip();
        false
    }

    fn at_block_end(&self) -> bool {
        self.current.is_keyword(KEYWORD_END) || self.current.is_keyword(KEYWORD_ELSE)
    }

    fn parse_statements(&mut self, list: &mut Vec<Stmt>) {
        loop {
            match self.current.token_type {
                TokenType::Eof => break,
                TokenType::Terminator => {
                    self.advance();
                }
                TokenType::String => {
                    if self.at_block_end() {
                        break;
                    }
                    list.push(self.parse_statement());
                }
            }
        }
    }

    fn parse_block(&mut self) -> BlockStmt {
        let mut list = Vec::new();
        self.parse_statements(&mut list);
        BlockStmt { list }
    }

    fn parse_statement(&mut self) -> Stmt {
        match self.current.token_type {
            TokenType::String if self.current.is_keyword(KEYWORD_IF) => self.parse_if(),
            TokenType::String => Stmt::Command(self.parse_command()),
            other => {
                self.error(format!("unexpected token {}", other));
                self.skip();
                Stmt::Bad
            }
        }
    }

    fn parse_if(&mut self) -> Stmt {
        if self.depth >= MAX_PARSER_DEPTH {
            self.error(format!(
                "maximum nesting depth ({}) exceeded",
                MAX_PARSER_DEPTH
            ));
            self.too_deep = true;
            while !self.current.is(TokenType::Eof) {
                self.advance();
            }
            return Stmt::Bad;
        }

        self.depth += 1;
        let stmt = self.parse_if_clause();
        self.depth -= 1;
        stmt
    }

    fn parse_if_clause(&mut self) -> Stmt {
        self.advance(); // `if`

        if !self.current.is(TokenType::String) {
            let message = format!(
                "expected command after \"if\", got {} instead",
                self.describe_current()
            );
            self.error(message);
            self.skip();
            return Stmt::Bad;
        }
        let cond = self.parse_command();
        let body = self.parse_block();

        let mut expect_end = true;
        let else_branch = if self.current.is_keyword(KEYWORD_ELSE) {
            self.advance();
            if self.current.is(TokenType::Terminator) {
                self.advance();
                Some(Stmt::Block(self.parse_block()))
            } else if self.current.is_keyword(KEYWORD_IF) {
                // The nested if consumes the shared `end`.
                expect_end = false;
                Some(self.parse_if())
            } else {
                let message = format!(
                    "expected next token to be TERMINATOR or \"if\", got {} instead",
                    self.describe_current()
                );
                self.error(message);
                Some(Stmt::Bad)
            }
        } else {
            None
        };

        if expect_end && self.expect_keyword(KEYWORD_END) {
            self.expect(TokenType::Terminator);
        }

        Stmt::If(IfStmt {
            cond,
            body,
            else_branch: else_branch.map(Box::new),
        })
    }

    fn parse_command(&mut self) -> CommandStmt {
        let command = Word::new(self.advance());
        let mut args = Vec::new();
        while self.current.is(TokenType::String) {
            args.push(Word::new(self.advance()));
        }
        self.expect(TokenType::Terminator);
        CommandStmt { command, args }
    }
}
