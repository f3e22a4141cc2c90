//! Interpreter module
//!
//! Evaluates parsed programs: variable scopes, word expansion and the
//! statement walker.

pub mod environment;
pub mod errors;
pub mod execution_engine;
pub mod types;
pub mod word_expansion;

pub use environment::*;
pub use errors::*;
pub use execution_engine::*;
pub use types::*;
pub use word_expansion::{expand, expand_word};
