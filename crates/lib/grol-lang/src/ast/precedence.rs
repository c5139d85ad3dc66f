use std::fmt;

/// Binding strength of operators, from the loosest to the tightest.
///
/// The derived ordering is the one the printer compares against: a node whose
/// operator has a lower level than the surrounding context must be
/// parenthesized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    #[default]
    Lowest,
    Assign,      // = :=
    Or,          // ||
    And,         // && and the range/map colon
    Lambda,      // =>
    Equals,      // == !=
    Compare,     // < > <= >=
    Sum,         // + - | ^
    Product,     // * % & << >>
    Divide,      // /
    Prefix,      // -x !x x++
    Call,        // f(x)
    Index,       // a[i]
    DotIndex,    // m.key
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Priority::Lowest => write!(f, "LOWEST"),
            Priority::Assign => write!(f, "ASSIGN"),
            Priority::Or => write!(f, "OR"),
            Priority::And => write!(f, "AND"),
            Priority::Lambda => write!(f, "LAMBDA"),
            Priority::Equals => write!(f, "EQUALS"),
            Priority::Compare => write!(f, "COMPARE"),
            Priority::Sum => write!(f, "SUM"),
            Priority::Product => write!(f, "PRODUCT"),
            Priority::Divide => write!(f, "DIVIDE"),
            Priority::Prefix => write!(f, "PREFIX"),
            Priority::Call => write!(f, "CALL"),
            Priority::Index => write!(f, "INDEX"),
            Priority::DotIndex => write!(f, "DOTINDEX"),
        }
    }
}
