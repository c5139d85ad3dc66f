use std::fmt;

use grol_lang::token::Token;
use grol_lang::utils::error::ReportableError;
use grol_lang::utils::metadata::Span;

/// Conditions that make printing a tree impossible. Both are fatal for the
/// call that hit them: the same tree fails the same way every time.
#[derive(Debug, Clone)]
pub enum PrintError {
    /// An operator node whose token kind is missing from the precedence
    /// table.
    NoPrecedence { token: Token },
    /// The output sink refused a write.
    Write(fmt::Error),
}

impl fmt::Display for PrintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintError::NoPrecedence { token } => {
                write!(f, "precedence not found for {}", token.literal())
            }
            PrintError::Write(_) => write!(f, "failed to write to the output"),
        }
    }
}

impl std::error::Error for PrintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PrintError::NoPrecedence { .. } => None,
            PrintError::Write(e) => Some(e),
        }
    }
}

impl From<fmt::Error> for PrintError {
    fn from(e: fmt::Error) -> Self {
        PrintError::Write(e)
    }
}

impl ReportableError for PrintError {
    fn get_labels(&self) -> Vec<(Span, String)> {
        match self {
            PrintError::NoPrecedence { token } => vec![(
                token.span.clone(),
                format!("{:?} is not an operator", token.kind),
            )],
            PrintError::Write(_) => vec![],
        }
    }
}
