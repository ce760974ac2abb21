//! Module resolution for `require`-style calls.
//!
//! `require("net.http")` has the type of whatever the `net/http` module's
//! file returns at top level. Resolving it is an inference request against
//! another file's tree, made through the same guarded entry point, so
//! modules that require each other terminate like any other cycle.

use lunar_common::{FileId, InFile};
use lunar_syntax::ast::expr::CallExpr;
use lunar_syntax::ast::stmt::SourceFile;
use lunar_syntax::ast::AstNode;
use tracing::debug;

use crate::engine::Engine;
use crate::guard::{InferCtx, ResolveMode};
use crate::ty::Ty;

/// A resolved module file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHandle {
    pub file: FileId,
    /// The candidate path that matched, e.g. `net/http/init`.
    pub path: String,
}

/// Normalize a `require` argument into a slash-separated module path.
///
/// Converts `\` to `/`, drops a leading `./` and a trailing `.lua`, and
/// turns dotted names (`a.b.c`) into paths (`a/b/c`). Returns `None` when
/// nothing is left.
pub fn normalize_module_path(raw: &str) -> Option<String> {
    let mut path = raw.trim().replace('\\', "/");
    while let Some(rest) = path.strip_prefix("./") {
        path = rest.to_string();
    }
    if let Some(stem) = path.strip_suffix(".lua") {
        path = stem.to_string();
    }
    if !path.contains('/') {
        path = path.replace('.', "/");
    }
    let path = path.trim_matches('/').to_string();
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

impl Engine<'_> {
    /// Find the module file a `require` path names, as seen from `origin`.
    pub fn resolve_module(&self, raw: &str, origin: FileId) -> Option<ModuleHandle> {
        let normalized = normalize_module_path(raw)?;
        self.settings.module_patterns().into_iter().find_map(|pattern| {
            let candidate = pattern.replace('?', &normalized);
            self.db
                .lookup_module(&candidate, origin)
                .map(|file| ModuleHandle {
                    file,
                    path: candidate,
                })
        })
    }

    /// The type of a module's file-level `return` expression.
    pub fn module_export_type(&self, handle: &ModuleHandle, ctx: &mut InferCtx) -> Ty {
        let Some(file) = self.db.parse(handle.file).and_then(SourceFile::cast) else {
            return Ty::Unknown;
        };
        match file.return_stmt().and_then(|ret| ret.first_expr()) {
            Some(expr) => self.infer(InFile::new(handle.file, &expr), ctx),
            None => Ty::Unknown,
        }
    }

    /// The type of a module-import call. The callee and any further
    /// arguments are not checked.
    pub(crate) fn require_type(&self, call: InFile<&CallExpr>, ctx: &mut InferCtx) -> Ty {
        if ctx.mode() == ResolveMode::LocalOnly {
            return Ty::Unknown;
        }
        let Some(path) = call.value.first_string_arg() else {
            debug!("require argument is not a string literal");
            return Ty::Unknown;
        };
        match self.resolve_module(&path, call.file_id) {
            Some(handle) => self.module_export_type(&handle, ctx),
            None => {
                debug!(%path, "require target did not resolve");
                Ty::Unknown
            }
        }
    }
}
