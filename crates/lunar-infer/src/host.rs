//! Collaborator interfaces the engine consumes.
//!
//! The engine never looks anything up on its own: trees, declarations and
//! module files come from the host through these traits. Implementations
//! absorb their own failures (missing files, I/O errors) and answer `None`.

use lunar_common::{FileId, InFile};
use lunar_syntax::ast::expr::{CallExpr, Expr, NameExpr};
use lunar_syntax::ast::stmt::FuncBody;
use lunar_syntax::SyntaxNode;

use crate::ty::Ty;

/// Access to the host's syntax trees and module files.
pub trait SourceDatabase {
    /// Root node of `file`, if the host has a tree for it.
    fn parse(&self, file: FileId) -> Option<SyntaxNode>;

    /// The file behind a normalized module path such as `net/http`,
    /// as seen from `origin`.
    fn lookup_module(&self, path: &str, origin: FileId) -> Option<FileId>;
}

/// What a name resolves to.
#[derive(Debug, Clone)]
pub enum Declaration {
    /// A variable whose value is this expression (`local x = <expr>`).
    Initializer(InFile<Expr>),
    /// A function declared with a body (`local function f() ... end`).
    Function(InFile<FuncBody>),
    /// A type the host already knows, e.g. from doc annotations.
    Annotated(Ty),
}

/// Name and declaration lookup.
pub trait NameResolver {
    /// The declaration a name expression refers to.
    fn resolve_name(&self, name: InFile<&NameExpr>) -> Option<Declaration>;

    /// The function body a call targets, found by name rather than by type.
    fn resolve_call_target(&self, call: InFile<&CallExpr>) -> Option<InFile<FuncBody>>;

    /// A declared function type for a body, e.g. from `---@param` and
    /// `---@return` annotations. When this gives nothing the engine derives
    /// the type from the body itself.
    fn annotated_function(&self, _body: InFile<&FuncBody>) -> Option<Ty> {
        None
    }
}
