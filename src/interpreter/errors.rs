//! Evaluation Errors
//!
//! Errors raised while evaluating a statement. None of them abort the script:
//! the evaluator turns each into a diagnostic line and a nonzero status, then
//! moves on to the next statement.

use thiserror::Error;

/// Failure while expanding a word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    /// `${` with no matching `}`
    #[error("unbalanced {{ in {word:?}")]
    UnbalancedBrace { word: String },
}
