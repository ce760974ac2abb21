//! Rowan-based concrete syntax tree types for Lua.
//!
//! Defines the `LuaLanguage` marker type that connects [`SyntaxKind`] to
//! rowan's generic tree infrastructure, plus type aliases for convenience.

use crate::syntax_kind::SyntaxKind;

/// Marker type for Lua in rowan's generic tree system.
///
/// Trees must be built from [`SyntaxKind`] values only. Converting a raw
/// kind above `TABLE_EXPR` panics, so a host translating its own parser's
/// tree has to map every kind first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LuaLanguage {}

impl rowan::Language for LuaLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::TABLE_EXPR as u16);
        // Safety: SyntaxKind is #[repr(u16)] with contiguous discriminants,
        // and the bound was checked above.
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A CST node (interior node with children).
pub type SyntaxNode = rowan::SyntaxNode<LuaLanguage>;

/// A CST token (leaf node with text).
pub type SyntaxToken = rowan::SyntaxToken<LuaLanguage>;

/// Either a node or a token in the CST.
pub type SyntaxElement = rowan::SyntaxElement<LuaLanguage>;
