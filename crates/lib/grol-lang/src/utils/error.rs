use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};

use crate::token::Token;

use super::metadata::Span;

/// An error that can point at the places in the source that caused it.
pub trait ReportableError: std::error::Error {
    /// message is used for reporting verbose message for `ariadne`.
    fn get_message(&self) -> String {
        self.to_string()
    }
    /// Label is used for indicating error with the specific position for `ariadne`.
    fn get_labels(&self) -> Vec<(Span, String)>;
}

/// ReportableError implements `PartialEq` mostly for testing purpose.
impl PartialEq for dyn ReportableError + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.get_labels() == other.get_labels()
    }
}

/// Inconsistent tree shapes rejected while building nodes.
#[derive(Debug, Clone)]
pub enum AstError {
    /// The same key appears twice in a map literal.
    DuplicateMapKey { key: Token },
}

impl std::fmt::Display for AstError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AstError::DuplicateMapKey { key } => {
                write!(f, "duplicate key {} in map literal", key.literal)
            }
        }
    }
}
impl std::error::Error for AstError {}
impl ReportableError for AstError {
    fn get_labels(&self) -> Vec<(Span, String)> {
        match self {
            AstError::DuplicateMapKey { key } => {
                vec![(key.span.clone(), "this key is already defined".to_string())]
            }
        }
    }
}

/// Print errors to stderr, annotated against the source they came from.
pub fn report(src: &str, path: &str, errs: &[Box<dyn ReportableError + '_>]) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    for e in errs {
        let rawlabels = e.get_labels();
        let labels = rawlabels.iter().map(|(span, message)| {
            Label::new((path, span.clone()))
                .with_message(message)
                .with_color(colors.next())
        });
        let span = rawlabels
            .first()
            .map_or(0..0, |(span, _message)| span.clone());
        Report::build(ReportKind::Error, (path, span))
            .with_message(e.get_message())
            .with_labels(labels)
            .finish()
            .eprint((path, Source::from(src)))?;
    }
    Ok(())
}

pub fn dump_to_string(errs: &[Box<dyn ReportableError + '_>]) -> String {
    let mut res = String::new();
    for e in errs {
        res += e.get_message().as_str();
    }
    res
}
