//! Lua syntax: a lossless rowan CST and a typed AST over it.
//!
//! This crate defines the tree the inference engine reads. Producing trees
//! from source text is the host's parser's job; [`make`] builds them
//! directly.

pub mod ast;
pub mod cst;
pub mod make;
pub mod syntax_kind;

pub use cst::{LuaLanguage, SyntaxElement, SyntaxNode, SyntaxToken};
pub use rowan::{GreenNode, TextRange, TextSize};
pub use syntax_kind::SyntaxKind;

/// Render a syntax tree as an indented listing of kinds, ranges and token
/// text. Whitespace tokens are omitted.
pub fn debug_tree(node: &SyntaxNode) -> String {
    let mut out = String::new();
    write_tree(&mut out, node, 0);
    out
}

fn write_tree(out: &mut String, node: &SyntaxNode, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}{:?}@{:?}\n", node.kind(), node.text_range()));
    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => write_tree(out, &n, depth + 1),
            rowan::NodeOrToken::Token(t) => {
                if t.kind() != SyntaxKind::WHITESPACE {
                    out.push_str(&format!("{indent}  {:?} {:?}\n", t.kind(), t.text()));
                }
            }
        }
    }
}
