use std::fmt;

use crate::ast::precedence::Priority;
use crate::utils::metadata::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,
    Int,
    Float,
    Str,
    LineComment,
    BlockComment,

    Assign,     // =
    Define,     // :=
    Plus,       // +
    Minus,      // -
    Bang,       // !
    Asterisk,   // *
    Slash,      // /
    Percent,    // %
    Lt,         // <
    Gt,         // >
    LtEq,       // <=
    GtEq,       // >=
    Eq,         // ==
    NotEq,      // !=
    Or,         // ||
    And,        // &&
    BitOr,      // |
    BitXor,     // ^
    BitAnd,     // &
    BitNot,     // ~
    LeftShift,  // <<
    RightShift, // >>
    Incr,       // ++
    Decr,       // --
    Lambda,     // =>
    Colon,      // :
    Dot,        // .
    DotDot,     // ..

    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    Func,
    Macro,
    True,
    False,
    If,
    Else,
    For,
    Return,
    Break,
    Continue,

    Len,
    First,
    Rest,
    Print,
    Println,
    Log,
    Error,
    Quote,
    Unquote,

    Eol,
    Eof,
    Illegal,
}

impl TokenKind {
    /// Level in the precedence table, `None` for anything that is never used
    /// as an operator.
    pub fn precedence(self) -> Option<Priority> {
        use TokenKind::*;
        match self {
            Define | Assign => Some(Priority::Assign),
            Or => Some(Priority::Or),
            And => Some(Priority::And),
            // range operator and map separator, binds looser than lambda
            Colon => Some(Priority::And),
            Lambda => Some(Priority::Lambda),
            Eq | NotEq => Some(Priority::Equals),
            Lt | Gt | LtEq | GtEq => Some(Priority::Compare),
            Plus | Minus | BitOr | BitXor => Some(Priority::Sum),
            BitAnd | Asterisk | Percent | LeftShift | RightShift => Some(Priority::Product),
            Slash => Some(Priority::Divide),
            Incr | Decr => Some(Priority::Prefix),
            LParen => Some(Priority::Call),
            LBracket => Some(Priority::Index),
            Dot => Some(Priority::DotIndex),

            Ident | Int | Float | Str | LineComment | BlockComment | Bang | BitNot | DotDot
            | Comma | Semicolon | RParen | LBrace | RBrace | RBracket | Func | Macro | True
            | False | If | Else | For | Return | Break | Continue | Len | First | Rest | Print
            | Println | Log | Error | Quote | Unquote | Eol | Eof | Illegal => None,
        }
    }

    /// Source text of kinds that are always spelled the same way.
    pub fn fixed_literal(self) -> Option<&'static str> {
        use TokenKind::*;
        let lit = match self {
            Assign => "=",
            Define => ":=",
            Plus => "+",
            Minus => "-",
            Bang => "!",
            Asterisk => "*",
            Slash => "/",
            Percent => "%",
            Lt => "<",
            Gt => ">",
            LtEq => "<=",
            GtEq => ">=",
            Eq => "==",
            NotEq => "!=",
            Or => "||",
            And => "&&",
            BitOr => "|",
            BitXor => "^",
            BitAnd => "&",
            BitNot => "~",
            LeftShift => "<<",
            RightShift => ">>",
            Incr => "++",
            Decr => "--",
            Lambda => "=>",
            Colon => ":",
            Dot => ".",
            DotDot => "..",
            Comma => ",",
            Semicolon => ";",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Func => "func",
            Macro => "macro",
            True => "true",
            False => "false",
            If => "if",
            Else => "else",
            For => "for",
            Return => "return",
            Break => "break",
            Continue => "continue",
            Len => "len",
            First => "first",
            Rest => "rest",
            Print => "print",
            Println => "println",
            Log => "log",
            Error => "error",
            Quote => "quote",
            Unquote => "unquote",
            Ident | Int | Float | Str | LineComment | BlockComment | Eol | Eof | Illegal => {
                return None;
            }
        };
        Some(lit)
    }

    pub fn is_builtin(self) -> bool {
        matches!(
            self,
            TokenKind::Len
                | TokenKind::First
                | TokenKind::Rest
                | TokenKind::Print
                | TokenKind::Println
                | TokenKind::Log
                | TokenKind::Error
                | TokenKind::Quote
                | TokenKind::Unquote
        )
    }
}

/// A lexical unit as produced by the lexer. Never mutated once built.
///
/// Two tokens compare equal when their kind and text match; where they were
/// found in the source is not part of the comparison, so trees built from
/// different inputs can be checked for structural equality.
#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }
    /// Token of a fixed-spelling kind, without source position.
    ///
    /// Kinds whose text varies (identifiers, numbers, strings, comments) get an
    /// empty literal; use [`Token::new`] for those.
    pub fn from_kind(kind: TokenKind) -> Self {
        Self::new(kind, kind.fixed_literal().unwrap_or_default(), 0..0)
    }
    pub fn literal(&self) -> &str {
        &self.literal
    }
    pub fn precedence(&self) -> Option<Priority> {
        self.kind.precedence()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.literal == other.literal
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.literal)
    }
}
