//! Tree constructors.
//!
//! Hosts that already hold a tree from their own parser convert it; tests
//! and embedders build one directly with these functions. Every constructor
//! returns a `GreenNode` so pieces compose bottom-up, and single spaces are
//! inserted between tokens so that `node.text()` reads like Lua source.

use rowan::{GreenNode, GreenToken, NodeOrToken};

use crate::syntax_kind::SyntaxKind::{self, *};

type GreenElement = NodeOrToken<GreenNode, GreenToken>;

fn node(kind: SyntaxKind, children: Vec<GreenElement>) -> GreenNode {
    GreenNode::new(kind.into(), children)
}

fn token(kind: SyntaxKind, text: &str) -> GreenElement {
    NodeOrToken::Token(GreenToken::new(kind.into(), text))
}

fn fixed(kind: SyntaxKind) -> GreenElement {
    token(kind, kind.fixed_text().unwrap_or_default())
}

fn ws() -> GreenElement {
    token(WHITESPACE, " ")
}

fn newline() -> GreenElement {
    token(WHITESPACE, "\n")
}

/// Interleave `items` with `, ` separators.
fn comma_separated(items: Vec<GreenNode>) -> Vec<GreenElement> {
    let mut out = Vec::with_capacity(items.len() * 3);
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(fixed(COMMA));
            out.push(ws());
        }
        out.push(item.into());
    }
    out
}

fn name(text: &str) -> GreenNode {
    node(NAME, vec![token(IDENT, text)])
}

fn block(stmts: Vec<GreenNode>) -> GreenNode {
    let mut children = Vec::with_capacity(stmts.len() * 2);
    for (i, stmt) in stmts.into_iter().enumerate() {
        if i > 0 {
            children.push(newline());
        }
        children.push(stmt.into());
    }
    node(BLOCK, children)
}

fn func_body(params: &[&str], body: Vec<GreenNode>) -> GreenNode {
    let mut param_children = vec![fixed(L_PAREN)];
    param_children.extend(comma_separated(params.iter().map(|p| name(p)).collect()));
    param_children.push(fixed(R_PAREN));
    node(
        FUNC_BODY,
        vec![
            node(PARAM_LIST, param_children).into(),
            ws(),
            block(body).into(),
            ws(),
            fixed(END_KW),
        ],
    )
}

fn arg_list(args: Vec<GreenNode>) -> GreenNode {
    let mut children = vec![fixed(L_PAREN)];
    children.extend(comma_separated(args));
    children.push(fixed(R_PAREN));
    node(ARG_LIST, children)
}

// ── Literals ─────────────────────────────────────────────────────────────

pub fn number(text: &str) -> GreenNode {
    node(LITERAL, vec![token(NUMBER, text)])
}

/// A double-quoted string literal holding `value`.
pub fn string(value: &str) -> GreenNode {
    string_raw(&format!("\"{value}\""))
}

/// A string literal written exactly as `text`, delimiters included.
pub fn string_raw(text: &str) -> GreenNode {
    node(LITERAL, vec![token(STRING, text)])
}

pub fn boolean(value: bool) -> GreenNode {
    node(LITERAL, vec![fixed(if value { TRUE_KW } else { FALSE_KW })])
}

pub fn nil() -> GreenNode {
    node(LITERAL, vec![fixed(NIL_KW)])
}

// ── Expressions ──────────────────────────────────────────────────────────

pub fn name_ref(text: &str) -> GreenNode {
    node(NAME_EXPR, vec![token(IDENT, text)])
}

pub fn paren(inner: GreenNode) -> GreenNode {
    node(PAREN_EXPR, vec![fixed(L_PAREN), inner.into(), fixed(R_PAREN)])
}

/// `op operand`. `op` must be a unary operator kind.
pub fn unary(op: SyntaxKind, operand: GreenNode) -> GreenNode {
    assert!(op.is_unary_op(), "{op:?} is not a unary operator");
    let mut children = vec![fixed(op)];
    if op == NOT_KW {
        children.push(ws());
    }
    children.push(operand.into());
    node(UNARY_EXPR, children)
}

/// `lhs op rhs`. `op` must be a binary operator kind.
pub fn binary(lhs: GreenNode, op: SyntaxKind, rhs: GreenNode) -> GreenNode {
    assert!(op.is_binary_op(), "{op:?} is not a binary operator");
    node(
        BINARY_EXPR,
        vec![lhs.into(), ws(), fixed(op), ws(), rhs.into()],
    )
}

/// `callee(args...)`
pub fn call(callee: GreenNode, args: Vec<GreenNode>) -> GreenNode {
    node(CALL_EXPR, vec![callee.into(), arg_list(args).into()])
}

/// `callee "value"`, the paren-less string call form.
pub fn call_str(callee: GreenNode, value: &str) -> GreenNode {
    let args = node(ARG_LIST, vec![string(value).into()]);
    node(CALL_EXPR, vec![callee.into(), ws(), args.into()])
}

/// `base.field`
pub fn field(base: GreenNode, field: &str) -> GreenNode {
    node(INDEX_EXPR, vec![base.into(), fixed(DOT), token(IDENT, field)])
}

/// `base:method`
pub fn method(base: GreenNode, method: &str) -> GreenNode {
    node(INDEX_EXPR, vec![base.into(), fixed(COLON), token(IDENT, method)])
}

/// `base[key]`
pub fn index(base: GreenNode, key: GreenNode) -> GreenNode {
    node(
        INDEX_EXPR,
        vec![base.into(), fixed(L_BRACKET), key.into(), fixed(R_BRACKET)],
    )
}

/// `base:method(args...)`
pub fn method_call(base: GreenNode, name: &str, args: Vec<GreenNode>) -> GreenNode {
    call(method(base, name), args)
}

/// `function(params) body end`
pub fn closure(params: &[&str], body: Vec<GreenNode>) -> GreenNode {
    node(CLOSURE_EXPR, vec![fixed(FUNCTION_KW), func_body(params, body).into()])
}

/// `{ values... }`
pub fn table(values: Vec<GreenNode>) -> GreenNode {
    let mut children = vec![fixed(L_BRACE)];
    children.extend(comma_separated(values));
    children.push(fixed(R_BRACE));
    node(TABLE_EXPR, children)
}

// ── Statements ───────────────────────────────────────────────────────────

/// `local names... = exprs...`
pub fn local(names: &[&str], exprs: Vec<GreenNode>) -> GreenNode {
    let name_list = node(NAME_LIST, comma_separated(names.iter().map(|n| name(n)).collect()));
    let mut children = vec![fixed(LOCAL_KW), ws(), name_list.into()];
    if !exprs.is_empty() {
        children.push(ws());
        children.push(fixed(EQ));
        children.push(ws());
        children.push(node(EXPR_LIST, comma_separated(exprs)).into());
    }
    node(LOCAL_STMT, children)
}

/// `local function name(params) body end`
pub fn local_function(fn_name: &str, params: &[&str], body: Vec<GreenNode>) -> GreenNode {
    node(
        LOCAL_FUNC_STMT,
        vec![
            fixed(LOCAL_KW),
            ws(),
            fixed(FUNCTION_KW),
            ws(),
            name(fn_name).into(),
            func_body(params, body).into(),
        ],
    )
}

/// `function target(params) body end`, where `target` is a name or field path.
pub fn function_stmt(target: GreenNode, params: &[&str], body: Vec<GreenNode>) -> GreenNode {
    node(
        FUNC_STMT,
        vec![
            fixed(FUNCTION_KW),
            ws(),
            target.into(),
            func_body(params, body).into(),
        ],
    )
}

/// `return exprs...`
pub fn ret(exprs: Vec<GreenNode>) -> GreenNode {
    let mut children = vec![fixed(RETURN_KW)];
    if !exprs.is_empty() {
        children.push(ws());
        children.push(node(EXPR_LIST, comma_separated(exprs)).into());
    }
    node(RETURN_STMT, children)
}

/// A call expression used as a statement.
pub fn call_stmt(call: GreenNode) -> GreenNode {
    node(CALL_STMT, vec![call.into()])
}

/// A whole file.
pub fn source_file(stmts: Vec<GreenNode>) -> GreenNode {
    node(SOURCE_FILE, vec![block(stmts).into()])
}
