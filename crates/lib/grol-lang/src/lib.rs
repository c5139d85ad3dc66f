//! Syntax tree of **grol**, a small expression-oriented language.
//!
//! The tree is produced by an external lexer/parser and consumed read-only by
//! the formatter in `grol-fmt` and by the evaluator. This crate only defines
//! its shape: the [`token`] model, the [`ast`] node set with its operator
//! [`ast::precedence`] table, and the errors raised when building nodes.

pub mod ast;
pub mod token;
pub mod utils;

pub use log;
