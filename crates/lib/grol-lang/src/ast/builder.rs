//! Helpers to assemble trees without going through the parser.
//!
//! All tokens get their canonical spelling and an empty span.

use super::*;
use crate::token::{Token, TokenKind};
use crate::utils::metadata::dummy_span;

fn tok(kind: TokenKind, literal: impl Into<String>) -> Token {
    Token::new(kind, literal, dummy_span())
}

pub fn identifier(name: &str) -> Identifier {
    Identifier {
        token: tok(TokenKind::Ident, name),
    }
}
pub fn ident(name: &str) -> Node {
    identifier(name).into()
}
pub fn int(value: i64) -> Node {
    IntegerLiteral {
        token: tok(TokenKind::Int, value.to_string()),
        value,
    }
    .into()
}
/// Uses the shortest text that reads back as the same float (`2.0`, `1e-7`).
pub fn float(value: f64) -> Node {
    FloatLiteral {
        token: tok(TokenKind::Float, format!("{value:?}")),
        value,
    }
    .into()
}
pub fn string(value: &str) -> Node {
    StringLiteral {
        token: tok(TokenKind::Str, value),
    }
    .into()
}
pub fn boolean(value: bool) -> Node {
    let kind = if value {
        TokenKind::True
    } else {
        TokenKind::False
    };
    Boolean {
        token: Token::from_kind(kind),
        value,
    }
    .into()
}
/// `// text` comment on its own line.
pub fn line_comment(text: &str) -> Node {
    Comment {
        token: tok(TokenKind::LineComment, text),
        same_line_as_previous: false,
        same_line_as_next: false,
    }
    .into()
}
/// `text` must include the comment markers, e.g. `// note` or `/* note */`.
pub fn comment(text: &str, same_line_as_previous: bool, same_line_as_next: bool) -> Node {
    let kind = if text.starts_with("/*") {
        TokenKind::BlockComment
    } else {
        TokenKind::LineComment
    };
    Comment {
        token: tok(kind, text),
        same_line_as_previous,
        same_line_as_next,
    }
    .into()
}
/// `break` or `continue`.
pub fn control(kind: TokenKind) -> Node {
    ControlExpression {
        token: Token::from_kind(kind),
    }
    .into()
}
pub fn ret(value: Option<Node>) -> Node {
    ReturnStatement {
        token: Token::from_kind(TokenKind::Return),
        value: value.map(Box::new),
    }
    .into()
}
pub fn prefix(op: TokenKind, right: Node) -> Node {
    PrefixExpression {
        token: Token::from_kind(op),
        right: Box::new(right),
    }
    .into()
}
/// `name++` / `name--`.
pub fn postfix(name: &str, op: TokenKind) -> Node {
    PostfixExpression {
        token: Token::from_kind(op),
        prev: tok(TokenKind::Ident, name),
    }
    .into()
}
pub fn infix(left: Node, op: TokenKind, right: Node) -> Node {
    InfixExpression {
        token: Token::from_kind(op),
        left: Box::new(left),
        right: Some(Box::new(right)),
    }
    .into()
}
/// Infix with nothing on its right, as in the `2:` of `a[2:]`.
pub fn infix_open(left: Node, op: TokenKind) -> Node {
    InfixExpression {
        token: Token::from_kind(op),
        left: Box::new(left),
        right: None,
    }
    .into()
}
pub fn index(left: Node, index: Node) -> Node {
    IndexExpression {
        token: Token::from_kind(TokenKind::LBracket),
        left: Box::new(left),
        index: Box::new(index),
    }
    .into()
}
/// `left.key`
pub fn dot(left: Node, key: &str) -> Node {
    IndexExpression {
        token: Token::from_kind(TokenKind::Dot),
        left: Box::new(left),
        index: Box::new(ident(key)),
    }
    .into()
}
pub fn call(function: Node, arguments: Vec<Node>) -> Node {
    CallExpression {
        token: Token::from_kind(TokenKind::LParen),
        function: Box::new(function),
        arguments,
    }
    .into()
}
pub fn builtin(name: TokenKind, parameters: Vec<Node>) -> Node {
    Builtin {
        token: Token::from_kind(name),
        parameters,
    }
    .into()
}
pub fn array(elements: Vec<Node>) -> Node {
    ArrayLiteral {
        token: Token::from_kind(TokenKind::LBracket),
        elements,
    }
    .into()
}
pub fn map(pairs: Vec<(Node, Node)>) -> Result<Node, AstError> {
    MapLiteral::new(Token::from_kind(TokenKind::LBrace), pairs).map(Node::from)
}
pub fn block(statements: Vec<Node>) -> Statements {
    Statements {
        token: Token::from_kind(TokenKind::LBrace),
        statements,
    }
}
/// Root statement sequence.
pub fn program(statements: Vec<Node>) -> Node {
    block(statements).into()
}
pub fn if_else(condition: Node, consequence: Statements, alternative: Option<Statements>) -> Node {
    IfExpression {
        token: Token::from_kind(TokenKind::If),
        condition: Box::new(condition),
        consequence,
        alternative,
    }
    .into()
}
pub fn for_loop(condition: Node, body: Statements) -> Node {
    ForExpression {
        token: Token::from_kind(TokenKind::For),
        condition: Box::new(condition),
        body,
    }
    .into()
}
fn parameters(names: &[&str]) -> (Vec<Node>, bool) {
    let variadic = names.last() == Some(&"..");
    let params = names
        .iter()
        .map(|name| {
            if *name == ".." {
                Node::from(Identifier {
                    token: Token::from_kind(TokenKind::DotDot),
                })
            } else {
                ident(name)
            }
        })
        .collect();
    (params, variadic)
}
/// `func name(params) {body}`; a trailing `..` parameter makes it variadic.
pub fn function(name: Option<&str>, params: &[&str], body: Statements) -> Node {
    let (parameters, variadic) = parameters(params);
    FunctionLiteral {
        token: Token::from_kind(TokenKind::Func),
        name: name.map(identifier),
        parameters,
        body,
        variadic,
        is_lambda: false,
    }
    .into()
}
/// `(params) => {body}`
pub fn lambda(params: &[&str], body: Statements) -> Node {
    let (parameters, variadic) = parameters(params);
    FunctionLiteral {
        token: Token::from_kind(TokenKind::Lambda),
        name: None,
        parameters,
        body,
        variadic,
        is_lambda: true,
    }
    .into()
}
pub fn macro_lit(params: &[&str], body: Statements) -> Node {
    MacroLiteral {
        token: Token::from_kind(TokenKind::Macro),
        parameters: parameters(params).0,
        body,
    }
    .into()
}

#[macro_export]
macro_rules! block {
    ($($s:expr),* $(,)?) => {
        $crate::ast::builder::block(vec![$($s),*])
    };
}

#[macro_export]
macro_rules! program {
    ($($s:expr),* $(,)?) => {
        $crate::ast::builder::program(vec![$($s),*])
    };
}

#[macro_export]
macro_rules! array {
    ($($e:expr),* $(,)?) => {
        $crate::ast::builder::array(vec![$($e),*])
    };
}
