//! Word Expansion
//!
//! Turns a raw word literal into its runtime string:
//! - Quote removal (`'...'`, `"..."`)
//! - Backslash escape decoding
//! - Variable interpolation (`$NAME`, `${NAME}`)
//!
//! Expansion runs when a statement executes, against the environment current
//! at that moment. It never modifies the word it was given.

use crate::ast::types::Word;
use crate::interpreter::environment::Environment;
use crate::interpreter::errors::ExpandError;

/// Characters that make a literal need any work at all.
const SPECIAL_CHARS: &[char] = &['$', '"', '\'', '\\'];

/// Expand a parsed word.
pub fn expand_word(env: &Environment, word: &Word) -> Result<String, ExpandError> {
    expand(env, word.literal())
}

/// Expand a raw literal.
///
/// Single-quoted words are returned verbatim without their quotes. Double
/// quoted and unquoted words get escapes decoded first and variables
/// interpolated second.
pub fn expand(env: &Environment, literal: &str) -> Result<String, ExpandError> {
    if !literal.contains(SPECIAL_CHARS) {
        return Ok(literal.to_string());
    }

    if let Some(inner) = strip_quotes(literal, '\'') {
        return Ok(inner.to_string());
    }
    let unquoted = strip_quotes(literal, '"').unwrap_or(literal);
    let decoded = expand_escapes(unquoted);
    expand_variables(env, &decoded)
}

/// Strip the surrounding `quote` characters if `literal` starts with one.
/// A missing closing quote (only possible after a lexer error) is tolerated.
fn strip_quotes(literal: &str, quote: char) -> Option<&str> {
    let inner = literal.strip_prefix(quote)?;
    Some(inner.strip_suffix(quote).unwrap_or(inner))
}

/// Decode backslash escapes: `\n` and `\t` become control characters, any
/// other escaped character stands for itself.
pub fn expand_escapes(src: &str) -> String {
    let mut result = String::with_capacity(src.len());
    let mut chars = src.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}

fn is_name_end(c: char) -> bool {
    c.is_whitespace() || matches!(c, '$' | '\'' | '"')
}

/// Replace every `$NAME` and `${NAME}` with the variable's value, or with
/// nothing when it is unset. A `$` not followed by a name is kept.
pub fn expand_variables(env: &Environment, src: &str) -> Result<String, ExpandError> {
    let mut result = String::with_capacity(src.len());
    let mut rest = src;

    while let Some(index) = rest.find('$') {
        result.push_str(&rest[..index]);
        rest = &rest[index + 1..];

        let name = if let Some(braced) = rest.strip_prefix('{') {
            let end = braced.find('}').ok_or_else(|| ExpandError::UnbalancedBrace {
                word: src.to_string(),
            })?;
            rest = &braced[end + 1..];
            &braced[..end]
        } else {
            let end = rest.find(is_name_end).unwrap_or(rest.len());
            let name = &rest[..end];
            rest = &rest[end..];
            if name.is_empty() {
                result.push('$');
                continue;
            }
            name
        };

        if let Some(value) = env.get(name) {
            result.push_str(value);
        }
    }

    result.push_str(rest);
    Ok(result)
}
