//! Turns a grol syntax tree back into source text.
//!
//! Parsing the text printed for a tree gives back the same tree (comments and
//! positions aside). Three profiles are available through [`Config`]:
//!
//! - canonical: one statement per line, tab indented blocks, spaced
//!   operators and comments where they were written.
//! - compact: a single line without comments and with as few spaces as
//!   possible.
//! - debug: compact with every operator expression parenthesized, an
//!   unambiguous fingerprint of the tree shape.
//!
//! ```
//! use grol_fmt::{Config, pretty_print};
//! use grol_lang::ast::builder::*;
//! use grol_lang::token::TokenKind;
//!
//! let sum = infix(ident("a"), TokenKind::Plus, ident("b"));
//! let tree = program(vec![infix(sum, TokenKind::Asterisk, ident("c"))]);
//! assert_eq!(pretty_print(&tree, Config::canonical()).unwrap(), "(a + b) * c\n");
//! ```

mod error;
pub mod print;

use grol_lang::ast::Node;

pub use error::PrintError;
pub use print::PrintState;

/// Output profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub compact: bool,
    pub all_parens: bool,
}

impl Config {
    pub fn canonical() -> Self {
        Self::default()
    }
    pub fn compact() -> Self {
        Self {
            compact: true,
            all_parens: false,
        }
    }
    pub fn debug() -> Self {
        Self {
            compact: true,
            all_parens: true,
        }
    }
}

/// Prints `node` with the given profile. Nothing is returned on failure, not
/// even the text printed up to that point.
pub fn pretty_print(node: &Node, config: Config) -> Result<String, PrintError> {
    let mut ps = PrintState::with_config(config);
    ps.pretty(node)?;
    Ok(ps.into_inner())
}

pub fn compact_print(node: &Node) -> Result<String, PrintError> {
    pretty_print(node, Config::compact())
}

/// Fully parenthesized single line form, for comparing tree shapes
/// independently of formatting.
pub fn debug_string(node: &Node) -> Result<String, PrintError> {
    pretty_print(node, Config::debug())
}
