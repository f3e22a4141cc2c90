//! Lexer for Ghost Scripts
//!
//! The lexer turns a character stream into a stream of tokens that the parser
//! consumes one at a time. It handles:
//! - Words (unquoted, single-quoted, double-quoted)
//! - Comments
//! - Line continuations
//! - Statement terminators, both explicit (`;`) and implicit (newline / EOF)
//!
//! Words keep their raw form: quote delimiters and backslash escapes are left
//! in the literal for the word expander to interpret at execution time.

use std::fmt;

use thiserror::Error;

use crate::ast::types::Position;

/// Token types for the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// A word: command name, argument or keyword
    String,
    /// End of a statement (`;`, newline or end of input)
    Terminator,
    /// End of input
    Eof,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Terminator => "TERMINATOR",
            Self::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    /// Raw text, unexpanded
    pub literal: String,
    /// Position of the first character
    pub pos: Position,
}

impl Token {
    pub fn new(token_type: TokenType, literal: impl Into<String>, pos: Position) -> Self {
        Self {
            token_type,
            literal: literal.into(),
            pos,
        }
    }

    pub fn string(literal: impl Into<String>, pos: Position) -> Self {
        Self::new(TokenType::String, literal, pos)
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }

    /// True for an unquoted word spelled exactly `keyword`.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.token_type == TokenType::String && self.literal == keyword
    }
}

/// Error reported when the lexer encounters invalid input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{pos} {message}")]
pub struct LexerError {
    pub message: String,
    pub pos: Position,
}

impl LexerError {
    pub fn new(message: impl Into<String>, pos: Position) -> Self {
        Self {
            message: message.into(),
            pos,
        }
    }
}

const UNEXPECTED_END: &str = "unexpected end of string";

/// Lexer over a script string.
///
/// `ch` is the current rune (the one-rune lookahead) and `pos` its position.
pub struct Lexer {
    input: Vec<char>,
    index: usize,
    ch: Option<char>,
    pos: Position,
    /// Set after a word; the next newline or EOF then yields a terminator.
    insert_terminator: bool,
    errors: Vec<LexerError>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let input: Vec<char> = input.chars().collect();
        let ch = input.first().copied();
        Self {
            input,
            index: 0,
            ch,
            pos: Position::default(),
            insert_terminator: false,
            errors: Vec::new(),
        }
    }

    /// Scan the whole input. The returned tokens always end with `Eof`.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<LexerError>) {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is(TokenType::Eof);
            tokens.push(token);
            if done {
                break;
            }
        }
        (tokens, self.errors)
    }

    /// Errors reported since the last call.
    pub fn take_errors(&mut self) -> Vec<LexerError> {
        std::mem::take(&mut self.errors)
    }

    fn error(&mut self, message: &str) {
        self.errors.push(LexerError::new(message, self.pos));
    }

    fn advance(&mut self) {
        let Some(c) = self.ch else {
            return;
        };
        self.pos.offset += c.len_utf8();
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        self.index += 1;
        self.ch = self.input.get(self.index).copied();
    }

    /// Produce the next token. After `Eof` every call returns `Eof` again.
    pub fn next_token(&mut self) -> Token {
        loop {
            while let Some(c) = self.ch {
                if !c.is_whitespace() {
                    break;
                }
                if c == '\n' && self.insert_terminator {
                    self.insert_terminator = false;
                    return Token::new(TokenType::Terminator, "\n", self.pos);
                }
                self.advance();
            }

            let pos = self.pos;
            match self.ch {
                None => {
                    if self.insert_terminator {
                        self.insert_terminator = false;
                        return Token::new(TokenType::Terminator, "", pos);
                    }
                    return Token::new(TokenType::Eof, "", pos);
                }
                Some(';') => {
                    self.insert_terminator = false;
                    self.advance();
                    return Token::new(TokenType::Terminator, ";", pos);
                }
                Some('#') => {
                    self.skip_comment();
                }
                Some(quote @ ('\'' | '"')) => {
                    self.insert_terminator = true;
                    let literal = self.read_quoted_word(quote);
                    return Token::string(literal, pos);
                }
                Some('\\') if self.input.get(self.index + 1) == Some(&'\n') => {
                    // Line continuation
                    self.advance();
                    self.advance();
                }
                Some(_) => {
                    self.insert_terminator = true;
                    let literal = self.read_word();
                    return Token::string(literal, pos);
                }
            }
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.ch {
            if c == '\r' || c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn read_word(&mut self) -> String {
        let mut literal = String::new();
        while let Some(c) = self.ch {
            match c {
                ';' | '\'' | '"' => break,
                '\\' => {
                    literal.push(c);
                    self.advance();
                    match self.ch {
                        Some(escaped) => {
                            literal.push(escaped);
                            self.advance();
                        }
                        None => {
                            self.error(UNEXPECTED_END);
                            break;
                        }
                    }
                }
                c if c.is_whitespace() => break,
                c => {
                    literal.push(c);
                    self.advance();
                }
            }
        }
        literal
    }

    fn read_quoted_word(&mut self, quote: char) -> String {
        let mut literal = String::new();
        literal.push(quote);
        self.advance();
        loop {
            match self.ch {
                None => {
                    self.error(UNEXPECTED_END);
                    break;
                }
                Some(c) if c == quote => {
                    literal.push(c);
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    let Some(escaped) = self.ch else {
                        self.error(UNEXPECTED_END);
                        break;
                    };
                    // Only an escaped closing quote is decoded here.
                    if escaped != quote {
                        literal.push('\\');
                    }
                    literal.push(escaped);
                    self.advance();
                }
                Some(c) => {
                    literal.push(c);
                    self.advance();
                }
            }
        }
        literal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<(TokenType, String)> {
        let (tokens, errors) = Lexer::new(input).tokenize();
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        tokens
            .into_iter()
            .map(|t| (t.token_type, t.literal))
            .collect()
    }

    fn s(lit: &str) -> (TokenType, String) {
        (TokenType::String, lit.to_string())
    }

    fn term(lit: &str) -> (TokenType, String) {
        (TokenType::Terminator, lit.to_string())
    }

    fn eof() -> (TokenType, String) {
        (TokenType::Eof, String::new())
    }

    #[test]
    fn test_simple_command() {
        assert_eq!(
            kinds("echo hello world"),
            vec![s("echo"), s("hello"), s("world"), term(""), eof()]
        );
    }

    #[test]
    fn test_newline_inserts_terminator() {
        assert_eq!(
            kinds("echo a\necho b"),
            vec![s("echo"), s("a"), term("\n"), s("echo"), s("b"), term(""), eof()]
        );
    }

    #[test]
    fn test_semicolon_clears_pending_terminator() {
        assert_eq!(
            kinds("echo a;\necho b;"),
            vec![s("echo"), s("a"), term(";"), s("echo"), s("b"), term(";"), eof()]
        );
    }

    #[test]
    fn test_blank_lines_produce_no_terminators() {
        assert_eq!(kinds("\n\n  \n"), vec![eof()]);
        assert_eq!(
            kinds("\n\necho a\n\n\n"),
            vec![s("echo"), s("a"), term("\n"), eof()]
        );
    }

    #[test]
    fn test_comment() {
        assert_eq!(
            kinds("echo hello  # put comment here\necho bye"),
            vec![
                s("echo"),
                s("hello"),
                term("\n"),
                s("echo"),
                s("bye"),
                term(""),
                eof()
            ]
        );
        assert_eq!(kinds("# only a comment"), vec![eof()]);
    }

    #[test]
    fn test_hash_inside_word_is_literal() {
        assert_eq!(kinds("a#b"), vec![s("a#b"), term(""), eof()]);
    }

    #[test]
    fn test_double_quotes_retained() {
        assert_eq!(
            kinds("echo \"hello world\""),
            vec![s("echo"), s("\"hello world\""), term(""), eof()]
        );
    }

    #[test]
    fn test_single_quotes_retained() {
        assert_eq!(kinds("'hello'"), vec![s("'hello'"), term(""), eof()]);
    }

    #[test]
    fn test_escaped_same_quote_is_decoded() {
        assert_eq!(
            kinds(r#""\"double quote\"""#),
            vec![s("\"\"double quote\"\""), term(""), eof()]
        );
        assert_eq!(kinds(r"'\'ghost\''"), vec![s("''ghost''"), term(""), eof()]);
    }

    #[test]
    fn test_other_escapes_in_quotes_are_kept() {
        assert_eq!(kinds(r#""a\nb""#), vec![s(r#""a\nb""#), term(""), eof()]);
        assert_eq!(kinds(r#"'it"s'"#), vec![s(r#"'it"s'"#), term(""), eof()]);
    }

    #[test]
    fn test_escaped_space_stays_in_word() {
        assert_eq!(kinds(r"hello\ world"), vec![s(r"hello\ world"), term(""), eof()]);
        assert_eq!(kinds(r"a\;b"), vec![s(r"a\;b"), term(""), eof()]);
    }

    #[test]
    fn test_line_continuation() {
        assert_eq!(
            kinds("echo a \\\n b"),
            vec![s("echo"), s("a"), s("b"), term(""), eof()]
        );
    }

    #[test]
    fn test_quote_ends_unquoted_word() {
        assert_eq!(
            kinds("ab\"cd\"ef"),
            vec![s("ab"), s("\"cd\""), s("ef"), term(""), eof()]
        );
    }

    #[test]
    fn test_positions() {
        let (tokens, _) = Lexer::new("echo hi\n  x").tokenize();
        assert_eq!(tokens[0].pos, Position::new(1, 1, 0));
        assert_eq!(tokens[1].pos, Position::new(1, 6, 5));
        assert_eq!(tokens[2].pos, Position::new(1, 8, 7));
        assert_eq!(tokens[3].pos, Position::new(2, 3, 10));
    }

    #[test]
    fn test_unterminated_quote_reports_error() {
        let (tokens, errors) = Lexer::new("echo \"abc").tokenize();
        assert_eq!(tokens[1].literal, "\"abc");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "unexpected end of string");
        assert_eq!(errors[0].pos, Position::new(1, 10, 9));
    }

    #[test]
    fn test_trailing_backslash_reports_error() {
        let (tokens, errors) = Lexer::new("echo abc\\").tokenize();
        assert_eq!(tokens[1].literal, "abc\\");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_error_still_ends_statement() {
        let (tokens, errors) = Lexer::new("echo 'a\\").tokenize();
        assert_eq!(errors.len(), 1);
        let kinds: Vec<TokenType> = tokens.iter().map(|t| t.token_type).collect();
        assert_eq!(
            kinds,
            vec![TokenType::String, TokenType::String, TokenType::Terminator, TokenType::Eof]
        );
        assert_eq!(tokens[1].literal, "'a");
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("");
        assert!(lexer.next_token().is(TokenType::Eof));
        assert!(lexer.next_token().is(TokenType::Eof));
    }

    #[test]
    fn test_next_token_one_at_a_time() {
        let mut lexer = Lexer::new("a b; c");
        let mut literals = Vec::new();
        loop {
            let token = lexer.next_token();
            if token.is(TokenType::Eof) {
                break;
            }
            literals.push(token.literal);
        }
        assert_eq!(literals, vec!["a", "b", ";", "c", ""]);
        assert!(lexer.take_errors().is_empty());
    }
}
