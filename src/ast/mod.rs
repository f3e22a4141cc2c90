//! Abstract Syntax Tree (AST) Types
//!
//! This module defines the tree the parser produces and the evaluator walks.
//!
//! Architecture:
//!   Input → Lexer → Parser → AST → Expander → Evaluator → Output

pub mod types;
