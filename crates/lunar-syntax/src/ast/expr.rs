//! Typed AST nodes for expressions.
//!
//! Covers the expression forms type inference dispatches on: literals, name
//! references, parentheses, unary and binary operators, calls, field and
//! index access, closures and table constructors.

use crate::ast::stmt::FuncBody;
use crate::ast::{ast_node, child_node, child_token, AstNode};
use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

// ── Expr enum ────────────────────────────────────────────────────────────

/// Any expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Literal(Literal),
    Name(NameExpr),
    Paren(ParenExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Call(CallExpr),
    Index(IndexExpr),
    Closure(ClosureExpr),
    Table(TableExpr),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::LITERAL => Some(Expr::Literal(Literal { syntax: node })),
            SyntaxKind::NAME_EXPR => Some(Expr::Name(NameExpr { syntax: node })),
            SyntaxKind::PAREN_EXPR => Some(Expr::Paren(ParenExpr { syntax: node })),
            SyntaxKind::UNARY_EXPR => Some(Expr::Unary(UnaryExpr { syntax: node })),
            SyntaxKind::BINARY_EXPR => Some(Expr::Binary(BinaryExpr { syntax: node })),
            SyntaxKind::CALL_EXPR => Some(Expr::Call(CallExpr { syntax: node })),
            SyntaxKind::INDEX_EXPR => Some(Expr::Index(IndexExpr { syntax: node })),
            SyntaxKind::CLOSURE_EXPR => Some(Expr::Closure(ClosureExpr { syntax: node })),
            SyntaxKind::TABLE_EXPR => Some(Expr::Table(TableExpr { syntax: node })),
            _ => None,
        }
    }

    /// Access the underlying syntax node regardless of variant.
    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Expr::Literal(n) => &n.syntax,
            Expr::Name(n) => &n.syntax,
            Expr::Paren(n) => &n.syntax,
            Expr::Unary(n) => &n.syntax,
            Expr::Binary(n) => &n.syntax,
            Expr::Call(n) => &n.syntax,
            Expr::Index(n) => &n.syntax,
            Expr::Closure(n) => &n.syntax,
            Expr::Table(n) => &n.syntax,
        }
    }

    /// Source text of the expression, trivia included.
    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }
}

/// The first non-trivia token directly under `node` whose kind passes `pred`.
fn direct_token(node: &SyntaxNode, pred: impl Fn(SyntaxKind) -> bool) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| pred(t.kind()))
}

// ── Literal ──────────────────────────────────────────────────────────────

/// Shape of a literal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Nil,
    Bool(bool),
    Number,
    String,
}

ast_node!(Literal, LITERAL);

impl Literal {
    /// The literal token (NUMBER, STRING, TRUE_KW, FALSE_KW, NIL_KW).
    pub fn token(&self) -> Option<SyntaxToken> {
        direct_token(&self.syntax, |k| !k.is_trivia())
    }

    pub fn kind(&self) -> Option<LiteralKind> {
        match self.token()?.kind() {
            SyntaxKind::NIL_KW => Some(LiteralKind::Nil),
            SyntaxKind::TRUE_KW => Some(LiteralKind::Bool(true)),
            SyntaxKind::FALSE_KW => Some(LiteralKind::Bool(false)),
            SyntaxKind::NUMBER => Some(LiteralKind::Number),
            SyntaxKind::STRING => Some(LiteralKind::String),
            _ => None,
        }
    }

    /// Contents of a string literal with its delimiters stripped.
    ///
    /// Escape sequences are left as written.
    pub fn string_value(&self) -> Option<String> {
        let token = self.token()?;
        if token.kind() != SyntaxKind::STRING {
            return None;
        }
        unquote(token.text()).map(str::to_string)
    }
}

/// Strip the delimiters from a Lua string literal.
///
/// Handles `"..."`, `'...'` and long brackets (`[[...]]`, `[==[...]==]`).
/// A newline directly after a long-bracket opener is not part of the value.
pub fn unquote(text: &str) -> Option<&str> {
    let first = text.chars().next()?;
    match first {
        '"' | '\'' => {
            if text.len() >= 2 && text.ends_with(first) {
                Some(&text[1..text.len() - 1])
            } else {
                None
            }
        }
        '[' => {
            let level = text[1..].chars().take_while(|&c| c == '=').count();
            let open_len = level + 2;
            if text.as_bytes().get(open_len - 1) != Some(&b'[') {
                return None;
            }
            let close = format!("]{}]", "=".repeat(level));
            if text.len() < open_len + close.len() || !text.ends_with(&close) {
                return None;
            }
            let inner = &text[open_len..text.len() - close.len()];
            Some(inner.strip_prefix('\n').unwrap_or(inner))
        }
        _ => None,
    }
}

// ── Name Reference ───────────────────────────────────────────────────────

ast_node!(NameExpr, NAME_EXPR);

impl NameExpr {
    /// The identifier text.
    pub fn name(&self) -> Option<String> {
        child_token(&self.syntax, SyntaxKind::IDENT).map(|t| t.text().to_string())
    }
}

// ── Parenthesized Expression ─────────────────────────────────────────────

ast_node!(ParenExpr, PAREN_EXPR);

impl ParenExpr {
    /// The wrapped expression.
    pub fn expr(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

// ── Unary Expression ─────────────────────────────────────────────────────

ast_node!(UnaryExpr, UNARY_EXPR);

impl UnaryExpr {
    /// The operator token.
    pub fn op(&self) -> Option<SyntaxToken> {
        direct_token(&self.syntax, SyntaxKind::is_unary_op)
    }

    /// The operand expression.
    pub fn operand(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

// ── Binary Expression ────────────────────────────────────────────────────

ast_node!(BinaryExpr, BINARY_EXPR);

impl BinaryExpr {
    /// The left-hand side expression.
    pub fn lhs(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    /// The right-hand side expression.
    pub fn rhs(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).nth(1)
    }

    /// The operator token.
    pub fn op(&self) -> Option<SyntaxToken> {
        direct_token(&self.syntax, SyntaxKind::is_binary_op)
    }
}

// ── Call Expression ──────────────────────────────────────────────────────

ast_node!(CallExpr, CALL_EXPR);

impl CallExpr {
    /// The callee expression (function being called).
    pub fn callee(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    /// The argument list.
    pub fn arg_list(&self) -> Option<ArgList> {
        child_node(&self.syntax)
    }

    /// All argument expressions, in order.
    pub fn args(&self) -> Vec<Expr> {
        self.arg_list()
            .map(|list| list.args().collect())
            .unwrap_or_default()
    }

    /// The unquoted text of the first argument, when it is a string literal.
    ///
    /// Covers both `require("a.b")` and `require "a.b"`.
    pub fn first_string_arg(&self) -> Option<String> {
        match self.arg_list()?.args().next()? {
            Expr::Literal(lit) => lit.string_value(),
            _ => None,
        }
    }
}

ast_node!(ArgList, ARG_LIST);

impl ArgList {
    /// All argument expressions.
    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        self.syntax.children().filter_map(Expr::cast)
    }
}

// ── Index Expression ─────────────────────────────────────────────────────

ast_node!(IndexExpr, INDEX_EXPR);

impl IndexExpr {
    /// The expression being indexed (the owning object).
    pub fn base(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    /// The bracketed key expression of `a[k]`.
    pub fn key(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).nth(1)
    }

    /// The accessed member name.
    ///
    /// `a.b` and `a:b` give `b`; `a["b"]` gives `b`; any other bracketed key
    /// has no static name.
    pub fn field_name(&self) -> Option<String> {
        if let Some(ident) = child_token(&self.syntax, SyntaxKind::IDENT) {
            return Some(ident.text().to_string());
        }
        match self.key()? {
            Expr::Literal(lit) => lit.string_value(),
            _ => None,
        }
    }

    /// Whether this is a method access (`a:b`).
    pub fn is_method(&self) -> bool {
        child_token(&self.syntax, SyntaxKind::COLON).is_some()
    }
}

// ── Closure Expression ───────────────────────────────────────────────────

ast_node!(ClosureExpr, CLOSURE_EXPR);

impl ClosureExpr {
    pub fn body(&self) -> Option<FuncBody> {
        child_node(&self.syntax)
    }
}

// ── Table Constructor ────────────────────────────────────────────────────

ast_node!(TableExpr, TABLE_EXPR);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquote_short_strings() {
        assert_eq!(unquote("\"hi\""), Some("hi"));
        assert_eq!(unquote("'a.b'"), Some("a.b"));
        assert_eq!(unquote("\"\""), Some(""));
        assert_eq!(unquote("\"open"), None);
        assert_eq!(unquote("'"), None);
    }

    #[test]
    fn unquote_long_brackets() {
        assert_eq!(unquote("[[mod]]"), Some("mod"));
        assert_eq!(unquote("[==[a]]b]==]"), Some("a]]b"));
        assert_eq!(unquote("[[\nline]]"), Some("line"));
        assert_eq!(unquote("[=[bad]]"), None);
        assert_eq!(unquote("[x]"), None);
    }

    #[test]
    fn unquote_rejects_non_strings() {
        assert_eq!(unquote("42"), None);
        assert_eq!(unquote(""), None);
    }
}
