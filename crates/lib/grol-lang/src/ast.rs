pub mod builder;
pub mod precedence;

use crate::token::{Token, TokenKind};
use crate::utils::error::AstError;

/// Every syntactic form of the language.
///
/// Nodes are built once by the parser (or the helpers in [`builder`]) and only
/// read afterwards. Each variant owns its children, and each carries exactly
/// one [`Token`], see [`Node::value`].
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    FloatLiteral(FloatLiteral),
    StringLiteral(StringLiteral),
    Boolean(Boolean),
    Comment(Comment),
    Control(ControlExpression), // break, continue
    Return(ReturnStatement),
    Prefix(PrefixExpression),
    Postfix(PostfixExpression),
    Infix(InfixExpression),
    Index(IndexExpression),
    Call(CallExpression),
    Builtin(Builtin),
    Array(ArrayLiteral),
    Map(MapLiteral),
    If(IfExpression),
    For(ForExpression),
    Function(FunctionLiteral),
    Macro(MacroLiteral),
    Statements(Statements),
}

impl Node {
    pub fn value(&self) -> &Token {
        match self {
            Node::Identifier(n) => &n.token,
            Node::IntegerLiteral(n) => &n.token,
            Node::FloatLiteral(n) => &n.token,
            Node::StringLiteral(n) => &n.token,
            Node::Boolean(n) => &n.token,
            Node::Comment(n) => &n.token,
            Node::Control(n) => &n.token,
            Node::Return(n) => &n.token,
            Node::Prefix(n) => &n.token,
            Node::Postfix(n) => &n.token,
            Node::Infix(n) => &n.token,
            Node::Index(n) => &n.token,
            Node::Call(n) => &n.token,
            Node::Builtin(n) => &n.token,
            Node::Array(n) => &n.token,
            Node::Map(n) => &n.token,
            Node::If(n) => &n.token,
            Node::For(n) => &n.token,
            Node::Function(n) => &n.token,
            Node::Macro(n) => &n.token,
            Node::Statements(n) => &n.token,
        }
    }
    pub fn literal(&self) -> &str {
        self.value().literal()
    }
}

macro_rules! impl_into_node {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(n: $ty) -> Self {
                    Node::$variant(n)
                }
            }
        )*
    };
}

impl_into_node!(
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    FloatLiteral(FloatLiteral),
    StringLiteral(StringLiteral),
    Boolean(Boolean),
    Comment(Comment),
    Control(ControlExpression),
    Return(ReturnStatement),
    Prefix(PrefixExpression),
    Postfix(PostfixExpression),
    Infix(InfixExpression),
    Index(IndexExpression),
    Call(CallExpression),
    Builtin(Builtin),
    Array(ArrayLiteral),
    Map(MapLiteral),
    If(IfExpression),
    For(ForExpression),
    Function(FunctionLiteral),
    Macro(MacroLiteral),
    Statements(Statements),
);

#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub token: Token,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatLiteral {
    pub token: Token,
    pub value: f64,
}

/// The token literal holds the unquoted, unescaped value.
#[derive(Clone, Debug, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boolean {
    pub token: Token,
    pub value: bool,
}

/// A comment kept in the tree so that it can be reproduced where it was.
#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    pub token: Token,
    /// Was on the same line as the statement before it.
    pub same_line_as_previous: bool,
    /// The next statement follows on the same line (block comments only).
    pub same_line_as_next: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ControlExpression {
    pub token: Token,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Option<Box<Node>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PrefixExpression {
    pub token: Token,
    pub right: Box<Node>,
}

/// `x++` and `x--`. `prev` is the token of the operand, kept for display.
#[derive(Clone, Debug, PartialEq)]
pub struct PostfixExpression {
    pub token: Token,
    pub prev: Token,
}

/// `right` is absent for one-sided slices such as `a[2:]`.
#[derive(Clone, Debug, PartialEq)]
pub struct InfixExpression {
    pub token: Token,
    pub left: Box<Node>,
    pub right: Option<Box<Node>>,
}

/// `a[i]` when the token is `[`, `m.key` when it is `.`.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexExpression {
    pub token: Token,
    pub left: Box<Node>,
    pub index: Box<Node>,
}

impl IndexExpression {
    pub fn is_bracket(&self) -> bool {
        self.token.kind == TokenKind::LBracket
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpression {
    pub token: Token, // the '(' token
    pub function: Box<Node>,
    pub arguments: Vec<Node>,
}

/// Same shape as a call but the callee is a reserved word such as `len`.
#[derive(Clone, Debug, PartialEq)]
pub struct Builtin {
    pub token: Token,
    pub parameters: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayLiteral {
    pub token: Token, // the '[' token
    pub elements: Vec<Node>,
}

/// Key/value pairs in the order they were written.
#[derive(Clone, Debug, PartialEq)]
pub struct MapLiteral {
    pub token: Token, // the '{' token
    pairs: Vec<(Node, Node)>,
}

impl MapLiteral {
    /// Fails if a key occurs twice, so the pairs are always a faithful
    /// record of the source.
    pub fn new(token: Token, pairs: Vec<(Node, Node)>) -> Result<Self, AstError> {
        for (i, (key, _)) in pairs.iter().enumerate() {
            if pairs[..i].iter().any(|(seen, _)| seen == key) {
                return Err(AstError::DuplicateMapKey {
                    key: key.value().clone(),
                });
            }
        }
        Ok(Self { token, pairs })
    }
    pub fn pairs(&self) -> &[(Node, Node)] {
        &self.pairs
    }
    pub fn len(&self) -> usize {
        self.pairs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfExpression {
    pub token: Token,
    pub condition: Box<Node>,
    pub consequence: Statements,
    pub alternative: Option<Statements>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForExpression {
    pub token: Token,
    pub condition: Box<Node>,
    pub body: Statements,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLiteral {
    pub token: Token, // the 'func' or '=>' token
    pub name: Option<Identifier>,
    /// The last one is the `..` marker when `variadic` is set.
    pub parameters: Vec<Node>,
    pub body: Statements,
    pub variadic: bool,
    pub is_lambda: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MacroLiteral {
    pub token: Token,
    pub parameters: Vec<Node>,
    pub body: Statements,
}

/// A sequence of statements: the program itself, or the body of a block.
#[derive(Clone, Debug, PartialEq)]
pub struct Statements {
    pub token: Token,
    pub statements: Vec<Node>,
}

impl Statements {
    pub fn len(&self) -> usize {
        self.statements.len()
    }
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
    /// The statement, if the block consists of exactly one.
    pub fn single(&self) -> Option<&Node> {
        match self.statements.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}
