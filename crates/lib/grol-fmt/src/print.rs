use std::fmt::{self, Write};

use grol_lang::ast::Node;
use grol_lang::ast::precedence::Priority;
use grol_lang::log;
use grol_lang::token::Token;
use itertools::{Itertools, Position};

use crate::{Config, PrintError};

pub type PrintResult = Result<(), PrintError>;

/// Cursor over the output while a tree is being printed.
///
/// Besides the sink it tracks how deep in nested blocks we are, the
/// precedence the current sub-expression is printed under, and just enough of
/// what was printed before (`prev`, `last`) to decide on separators.
pub struct PrintState<'a, W: Write = String> {
    out: W,
    pub indent_level: usize,
    pub expression_precedence: Priority,
    /// Tabs for the current line were already written.
    pub indentation_done: bool,
    /// No indentation, no newlines, fewer spaces, no comments.
    pub compact: bool,
    /// Parenthesize every operator expression.
    pub all_parens: bool,
    prev: Option<&'a Node>,
    /// Last character written to `out`.
    last: Option<char>,
}

impl PrintState<'_, String> {
    pub fn new() -> Self {
        Self::with_writer(String::new())
    }
    pub fn with_config(config: Config) -> Self {
        Self::new().configure(config)
    }
    /// Everything printed so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }
}

impl Default for PrintState<'_, String> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, W: Write> PrintState<'a, W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            indent_level: 0,
            expression_precedence: Priority::Lowest,
            indentation_done: false,
            compact: false,
            all_parens: false,
            prev: None,
            last: None,
        }
    }
    pub fn configure(mut self, config: Config) -> Self {
        self.compact = config.compact;
        self.all_parens = config.all_parens;
        self
    }
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes the fragments, indenting first if nothing was written on the
    /// current line yet. An empty slice writes nothing at all.
    ///
    /// A space is slipped in when the first character would otherwise form
    /// an operator with the one before it, as in `a - -b` printed compact.
    pub fn print(&mut self, fragments: &[&str]) -> fmt::Result {
        if fragments.is_empty() {
            return Ok(());
        }
        if !self.compact && !self.indentation_done && self.indent_level > 1 {
            for _ in 1..self.indent_level {
                self.out.write_char('\t')?;
            }
            self.indentation_done = true;
            self.last = Some('\t');
        }
        let first = fragments.iter().find_map(|s| s.chars().next());
        if let (Some(prev), Some(next)) = (self.last, first) {
            if glues(prev, next) {
                log::trace!("spacing {prev:?} apart from {next:?}");
                self.write_space()?;
            }
        }
        for s in fragments {
            self.out.write_str(s)?;
            if let Some(c) = s.chars().next_back() {
                self.last = Some(c);
            }
        }
        Ok(())
    }

    /// Like [`print`](Self::print), then ends the line unless compact.
    pub fn println(&mut self, fragments: &[&str]) -> fmt::Result {
        self.print(fragments)?;
        if !self.compact {
            self.out.write_char('\n')?;
            self.last = Some('\n');
        }
        self.indentation_done = false;
        Ok(())
    }

    // separators between statements skip indentation and lookback
    fn write_space(&mut self) -> fmt::Result {
        self.last = Some(' ');
        self.out.write_char(' ')
    }

    fn list_separator(&self) -> &'static str {
        if self.compact { "," } else { ", " }
    }

    /// Switches to the precedence of `token` and tells whether the
    /// expression needs parentheses in the context it replaced, which is
    /// returned for the caller to restore.
    fn need_paren(&mut self, token: &Token) -> Result<(bool, Priority), PrintError> {
        let Some(new_precedence) = token.precedence() else {
            log::error!("precedence not found for {:?} {}", token.kind, token.literal());
            return Err(PrintError::NoPrecedence {
                token: token.clone(),
            });
        };
        let old_precedence = self.expression_precedence;
        self.expression_precedence = new_precedence;
        let need_paren = self.all_parens || new_precedence < old_precedence;
        log::trace!(
            "{} is {new_precedence} under {old_precedence}, parens: {need_paren}",
            token.literal()
        );
        Ok((need_paren, old_precedence))
    }

    /// Prints `node` and everything under it.
    pub fn pretty(&mut self, node: &'a Node) -> PrintResult {
        match node {
            Node::Identifier(_)
            | Node::IntegerLiteral(_)
            | Node::FloatLiteral(_)
            | Node::Boolean(_)
            | Node::Comment(_)
            | Node::Control(_) => literal::pretty(node.value(), self),
            Node::StringLiteral(s) => literal::string(s, self),
            Node::Prefix(e) => expr::prefix(e, self),
            Node::Postfix(e) => expr::postfix(e, self),
            Node::Infix(e) => expr::infix(e, self),
            Node::Index(e) => expr::index(e, self),
            Node::Call(e) => expr::call(e, self),
            Node::Builtin(e) => expr::builtin(e, self),
            Node::Array(e) => expr::array(e, self),
            Node::Map(e) => expr::map(e, self),
            Node::Return(s) => control::ret(s, self),
            Node::If(e) => control::if_expr(e, self),
            Node::For(e) => control::for_expr(e, self),
            Node::Function(f) => function::pretty(f, self),
            Node::Macro(m) => function::macro_lit(m, self),
            Node::Statements(s) => block::pretty(s, self),
        }
    }

    pub fn print_list(&mut self, list: &'a [Node], sep: &str) -> PrintResult {
        for (position, node) in list.iter().with_position() {
            if matches!(position, Position::Middle | Position::Last) {
                self.print(&[sep])?;
            }
            self.pretty(node)?;
        }
        Ok(())
    }

    pub fn comma_list(&mut self, list: &'a [Node]) -> PrintResult {
        let sep = self.list_separator();
        self.print_list(list, sep)
    }

    /// Prints `list` with the ambient precedence reset, as call arguments
    /// never inherit the context of the call itself.
    fn argument_list(&mut self, list: &'a [Node]) -> PrintResult {
        let old_precedence = self.expression_precedence;
        self.expression_precedence = Priority::Lowest;
        self.comma_list(list)?;
        self.expression_precedence = old_precedence;
        Ok(())
    }
}

/// Two characters the lexer would read as a single operator.
fn glues(prev: char, next: char) -> bool {
    matches!(
        (prev, next),
        ('-', '-')
            | ('+', '+')
            | ('=', '=' | '>')
            | ('!', '=')
            | ('<', '=' | '<')
            | ('>', '=' | '>')
            | ('&', '&')
            | ('|', '|')
            | (':', '=')
            | ('.', '.')
            | ('/', '/' | '*')
    )
}

/// Go style double quoted string literal.
pub fn quote(s: &str) -> String {
    let mut res = String::with_capacity(s.len() + 2);
    res.push('"');
    for c in s.chars() {
        match c {
            '"' => res.push_str("\\\""),
            '\\' => res.push_str("\\\\"),
            '\x07' => res.push_str("\\a"),
            '\x08' => res.push_str("\\b"),
            '\x0c' => res.push_str("\\f"),
            '\n' => res.push_str("\\n"),
            '\r' => res.push_str("\\r"),
            '\t' => res.push_str("\\t"),
            '\x0b' => res.push_str("\\v"),
            c if c.is_control() && (c as u32) < 0x80 => {
                res.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => res.push_str(&format!("\\u{:04x}", c as u32)),
            c => res.push(c),
        }
    }
    res.push('"');
    res
}

mod literal {
    use grol_lang::ast::StringLiteral;

    use super::*;
    pub(super) fn pretty<W: Write>(token: &Token, ps: &mut PrintState<'_, W>) -> PrintResult {
        ps.print(&[token.literal()])?;
        Ok(())
    }
    pub(super) fn string<W: Write>(s: &StringLiteral, ps: &mut PrintState<'_, W>) -> PrintResult {
        let quoted = quote(s.token.literal());
        ps.print(&[quoted.as_str()])?;
        Ok(())
    }
}

mod expr {
    use grol_lang::ast::{
        ArrayLiteral, Builtin, CallExpression, IndexExpression, InfixExpression, MapLiteral,
        PostfixExpression, PrefixExpression,
    };

    use super::*;
    pub(super) fn prefix<'a, W: Write>(
        e: &'a PrefixExpression,
        ps: &mut PrintState<'a, W>,
    ) -> PrintResult {
        let old_precedence = ps.expression_precedence;
        ps.expression_precedence = Priority::Prefix;
        // stacked prefixes need parens, -(-a) must not come out as --a
        let need_paren = ps.all_parens || Priority::Prefix <= old_precedence;
        if need_paren {
            ps.print(&["("])?;
        }
        ps.print(&[e.token.literal()])?;
        ps.pretty(&e.right)?;
        ps.expression_precedence = old_precedence;
        if need_paren {
            ps.print(&[")"])?;
        }
        Ok(())
    }
    pub(super) fn postfix<'a, W: Write>(
        e: &'a PostfixExpression,
        ps: &mut PrintState<'a, W>,
    ) -> PrintResult {
        let (need_paren, old_precedence) = ps.need_paren(&e.token)?;
        if need_paren {
            ps.print(&["("])?;
        }
        ps.print(&[e.prev.literal(), e.token.literal()])?;
        if need_paren {
            ps.print(&[")"])?;
        }
        ps.expression_precedence = old_precedence;
        Ok(())
    }
    pub(super) fn infix<'a, W: Write>(
        e: &'a InfixExpression,
        ps: &mut PrintState<'a, W>,
    ) -> PrintResult {
        let (need_paren, old_precedence) = ps.need_paren(&e.token)?;
        if need_paren {
            ps.print(&["("])?;
        }
        ps.pretty(&e.left)?;
        // absent for the colon of a one-sided slice, printed as `a[2:]`
        match &e.right {
            Some(right) => {
                if ps.compact {
                    ps.print(&[e.token.literal()])?;
                } else {
                    ps.print(&[" ", e.token.literal(), " "])?;
                }
                ps.pretty(right)?;
            }
            None => ps.print(&[e.token.literal()])?,
        }
        if need_paren {
            ps.print(&[")"])?;
        }
        ps.expression_precedence = old_precedence;
        Ok(())
    }
    pub(super) fn index<'a, W: Write>(
        e: &'a IndexExpression,
        ps: &mut PrintState<'a, W>,
    ) -> PrintResult {
        let (need_paren, old_precedence) = ps.need_paren(&e.token)?;
        if need_paren {
            ps.print(&["("])?;
        }
        // calls, subscripts and dots chain left to right: f()[0].x
        ps.expression_precedence = Priority::Call;
        ps.pretty(&e.left)?;
        ps.print(&[e.token.literal()])?;
        ps.expression_precedence = Priority::Lowest;
        ps.pretty(&e.index)?;
        if e.is_bracket() {
            ps.print(&["]"])?;
        }
        if need_paren {
            ps.print(&[")"])?;
        }
        ps.expression_precedence = old_precedence;
        Ok(())
    }
    pub(super) fn call<'a, W: Write>(
        e: &'a CallExpression,
        ps: &mut PrintState<'a, W>,
    ) -> PrintResult {
        let (need_paren, old_precedence) = ps.need_paren(&e.token)?;
        if need_paren {
            ps.print(&["("])?;
        }
        // a lambda body would otherwise swallow the argument list
        let lambda_callee = matches!(&*e.function, Node::Function(f) if f.is_lambda);
        if lambda_callee {
            ps.print(&["("])?;
        }
        ps.pretty(&e.function)?;
        if lambda_callee {
            ps.print(&[")"])?;
        }
        ps.print(&["("])?;
        ps.argument_list(&e.arguments)?;
        ps.print(&[")"])?;
        if need_paren {
            ps.print(&[")"])?;
        }
        ps.expression_precedence = old_precedence;
        Ok(())
    }
    pub(super) fn builtin<'a, W: Write>(
        e: &'a Builtin,
        ps: &mut PrintState<'a, W>,
    ) -> PrintResult {
        ps.print(&[e.token.literal(), "("])?;
        ps.argument_list(&e.parameters)?;
        ps.print(&[")"])?;
        Ok(())
    }
    pub(super) fn array<'a, W: Write>(
        e: &'a ArrayLiteral,
        ps: &mut PrintState<'a, W>,
    ) -> PrintResult {
        ps.print(&["["])?;
        ps.comma_list(&e.elements)?;
        ps.print(&["]"])?;
        Ok(())
    }
    pub(super) fn map<'a, W: Write>(e: &'a MapLiteral, ps: &mut PrintState<'a, W>) -> PrintResult {
        let sep = ps.list_separator();
        ps.print(&["{"])?;
        for (position, (key, value)) in e.pairs().iter().with_position() {
            if matches!(position, Position::Middle | Position::Last) {
                ps.print(&[sep])?;
            }
            ps.pretty(key)?;
            ps.print(&[":"])?;
            ps.pretty(value)?;
        }
        ps.print(&["}"])?;
        Ok(())
    }
}

mod control {
    use grol_lang::ast::{ForExpression, IfExpression, ReturnStatement, Statements};

    use super::*;
    pub(super) fn ret<'a, W: Write>(
        s: &'a ReturnStatement,
        ps: &mut PrintState<'a, W>,
    ) -> PrintResult {
        ps.print(&[s.token.literal()])?;
        if let Some(value) = &s.value {
            ps.print(&[" "])?;
            ps.pretty(value)?;
        }
        Ok(())
    }
    pub(super) fn if_expr<'a, W: Write>(
        e: &'a IfExpression,
        ps: &mut PrintState<'a, W>,
    ) -> PrintResult {
        ps.print(&["if "])?;
        ps.pretty(&e.condition)?;
        if !ps.compact {
            ps.print(&[" "])?;
        }
        block::pretty(&e.consequence, ps)?;
        if let Some(alternative) = &e.alternative {
            else_branch(alternative, ps)?;
        }
        Ok(())
    }
    /// An alternative made of a single `if` is chained as `else if` instead
    /// of being nested in its own block.
    fn else_branch<'a, W: Write>(
        alternative: &'a Statements,
        ps: &mut PrintState<'a, W>,
    ) -> PrintResult {
        if ps.compact {
            ps.print(&["else"])?;
        } else {
            ps.print(&[" else "])?;
        }
        if let Some(Node::If(chained)) = alternative.single() {
            if ps.compact {
                ps.print(&[" "])?;
            }
            return if_expr(chained, ps);
        }
        block::pretty(alternative, ps)
    }
    pub(super) fn for_expr<'a, W: Write>(
        e: &'a ForExpression,
        ps: &mut PrintState<'a, W>,
    ) -> PrintResult {
        ps.print(&["for "])?;
        ps.pretty(&e.condition)?;
        if !ps.compact {
            ps.print(&[" "])?;
        }
        block::pretty(&e.body, ps)
    }
}

mod function {
    use grol_lang::ast::{FunctionLiteral, MacroLiteral};

    use super::*;
    fn lambda<'a, W: Write>(f: &'a FunctionLiteral, ps: &mut PrintState<'a, W>) -> PrintResult {
        let need_paren = f.parameters.len() != 1;
        if need_paren {
            ps.print(&["("])?;
        }
        ps.comma_list(&f.parameters)?;
        if need_paren {
            ps.print(&[")"])?;
        }
        if ps.compact {
            ps.print(&["=>"])?;
        } else {
            ps.print(&[" => "])?;
        }
        block::pretty(&f.body, ps)
    }
    pub(super) fn pretty<'a, W: Write>(
        f: &'a FunctionLiteral,
        ps: &mut PrintState<'a, W>,
    ) -> PrintResult {
        if f.is_lambda {
            return lambda(f, ps);
        }
        ps.print(&[f.token.literal()])?;
        if let Some(name) = &f.name {
            ps.print(&[" ", name.token.literal()])?;
        }
        ps.print(&["("])?;
        ps.comma_list(&f.parameters)?;
        if ps.compact {
            ps.print(&[")"])?;
        } else {
            ps.print(&[") "])?;
        }
        block::pretty(&f.body, ps)
    }
    pub(super) fn macro_lit<'a, W: Write>(
        m: &'a MacroLiteral,
        ps: &mut PrintState<'a, W>,
    ) -> PrintResult {
        ps.print(&[m.token.literal(), "("])?;
        ps.comma_list(&m.parameters)?;
        if ps.compact {
            ps.print(&[")"])?;
        } else {
            ps.print(&[") "])?;
        }
        block::pretty(&m.body, ps)
    }
}

mod block {
    use grol_lang::ast::Statements;

    use super::*;

    fn keep_same_line_as_previous(node: &Node) -> bool {
        match node {
            Node::Comment(c) => c.same_line_as_previous,
            _ => false,
        }
    }

    fn need_newline_after(node: Option<&Node>) -> bool {
        match node {
            Some(Node::Comment(c)) => !c.same_line_as_next,
            _ => true,
        }
    }

    fn is_identifier_like(node: &Node) -> bool {
        matches!(
            node,
            Node::Identifier(_) | Node::Builtin(_) | Node::Call(_) | Node::Control(_)
        )
    }

    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    /// Whether the statement is printed starting with a keyword, a name or a
    /// number, at the lowest precedence.
    fn starts_with_word(node: &Node) -> bool {
        match node {
            Node::Identifier(_)
            | Node::IntegerLiteral(_)
            | Node::FloatLiteral(_)
            | Node::Boolean(_)
            | Node::Control(_)
            | Node::Return(_)
            | Node::Postfix(_)
            | Node::Builtin(_)
            | Node::If(_)
            | Node::For(_)
            | Node::Macro(_) => true,
            Node::Function(f) => !f.is_lambda || f.parameters.len() == 1,
            Node::Call(e) => match &*e.function {
                Node::Function(f) if f.is_lambda => false,
                callee => starts_with_word(callee),
            },
            Node::Infix(e) => starts_with_word(&e.left),
            Node::Index(e) => starts_with_word(&e.left),
            Node::StringLiteral(_)
            | Node::Comment(_)
            | Node::Prefix(_)
            | Node::Array(_)
            | Node::Map(_)
            | Node::Statements(_) => false,
        }
    }

    /// Compact form: comments are dropped (returns true), otherwise only
    /// a space where two statements would run into each other.
    fn compact_separator<W: Write>(
        ps: &mut PrintState<'_, W>,
        s: &Node,
        i: usize,
    ) -> Result<bool, PrintError> {
        if matches!(s, Node::Comment(_)) {
            return Ok(true);
        }
        if i == 0 {
            return Ok(false);
        }
        let prev_is_infix = matches!(ps.prev, Some(Node::Infix(_)));
        let cur_is_array = matches!(s, Node::Array(_));
        let after_word = ps.last.is_some_and(is_word_char) && starts_with_word(s);
        if cur_is_array || (prev_is_infix && !matches!(ps.last, Some('}' | ']'))) {
            ps.write_space()?;
        } else if after_word || (is_identifier_like(s) && ps.prev.is_some_and(is_identifier_like))
        {
            ps.write_space()?;
        }
        Ok(false)
    }

    /// Long form: a newline between statements, or a space to keep a comment
    /// on the line it was written on.
    fn long_form_separator<W: Write>(
        ps: &mut PrintState<'_, W>,
        s: &Node,
        i: usize,
    ) -> PrintResult {
        if i > 0 || ps.indent_level > 1 {
            if keep_same_line_as_previous(s) || !need_newline_after(ps.prev) {
                log::debug!("=> PrettyPrint adding just a space");
                ps.write_space()?;
                ps.indentation_done = true;
            } else {
                log::debug!("=> PrettyPrint adding newline");
                ps.println(&[])?;
            }
        }
        Ok(())
    }

    /// Statements at the root print bare; nested ones get braces and one
    /// more level of indentation.
    pub(super) fn pretty<'a, W: Write>(
        stmts: &'a Statements,
        ps: &mut PrintState<'a, W>,
    ) -> PrintResult {
        let old_precedence = ps.expression_precedence;
        if ps.indent_level > 0 {
            // first statement might be a comment on the same line as the brace
            ps.print(&["{"])?;
        }
        ps.indent_level += 1;
        ps.expression_precedence = Priority::Lowest;
        ps.prev = None;
        let mut i = 0;
        for s in &stmts.statements {
            if ps.compact {
                if compact_separator(ps, s, i)? {
                    continue;
                }
            } else {
                long_form_separator(ps, s, i)?;
            }
            ps.pretty(s)?;
            ps.prev = Some(s);
            i += 1;
        }
        ps.println(&[])?;
        ps.indent_level -= 1;
        ps.expression_precedence = old_precedence;
        if ps.indent_level > 0 {
            ps.print(&["}"])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn print_indents_once_per_line() {
        let mut ps = PrintState::new();
        ps.indent_level = 3;
        ps.print(&["a", "b"]).unwrap();
        ps.print(&["c"]).unwrap();
        ps.println(&[]).unwrap();
        ps.print(&["d"]).unwrap();
        assert_eq!(ps.as_str(), "\t\tabc\n\t\td");
    }

    #[test]
    fn no_tabs_at_first_level() {
        let mut ps = PrintState::new();
        ps.indent_level = 1;
        ps.println(&["x"]).unwrap();
        assert_eq!(ps.as_str(), "x\n");
    }

    #[test]
    fn empty_print_writes_nothing() {
        let mut ps = PrintState::new();
        ps.indent_level = 2;
        ps.print(&[]).unwrap();
        ps.println(&[]).unwrap();
        assert_eq!(ps.as_str(), "\n");
    }

    #[test]
    fn compact_has_no_newlines_or_tabs() {
        let mut ps = PrintState::with_config(Config::compact());
        ps.indent_level = 4;
        ps.println(&["a"]).unwrap();
        ps.println(&["b"]).unwrap();
        assert_eq!(ps.as_str(), "ab");
    }

    #[test]
    fn remembers_last_char() {
        let mut ps = PrintState::new();
        ps.print(&["x", "]", ""]).unwrap();
        assert_eq!(ps.last, Some(']'));
        ps.println(&[]).unwrap();
        assert_eq!(ps.last, Some('\n'));
    }

    #[test]
    fn operators_never_glue() {
        let mut ps = PrintState::with_config(Config::compact());
        ps.print(&["a", "-"]).unwrap();
        ps.print(&["-", "b"]).unwrap();
        ps.print(&["<"]).unwrap();
        ps.print(&["="]).unwrap();
        ps.print(&["-"]).unwrap();
        ps.print(&["1"]).unwrap();
        assert_eq!(ps.as_str(), "a- -b< =-1");
    }

    #[test]
    fn quoting() {
        assert_eq!(quote("abc"), r#""abc""#);
        assert_eq!(quote("a\"b"), r#""a\"b""#);
        assert_eq!(quote("back\\slash"), r#""back\\slash""#);
        assert_eq!(quote("l1\nl2\t\r"), r#""l1\nl2\t\r""#);
        assert_eq!(quote("\x07\x08\x0c\x0b"), r#""\a\b\f\v""#);
        assert_eq!(quote("\x01\x7f"), r#""\x01\x7f""#);
        assert_eq!(quote("\u{85}"), r#""\u0085""#);
        assert_eq!(quote("héllo ✓"), "\"héllo ✓\"");
    }
}
