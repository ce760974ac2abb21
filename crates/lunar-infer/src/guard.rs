//! Per-request inference context and recursion guard.
//!
//! Inference is a recursive walk: a name resolves to an initializer, which
//! calls a function, whose body returns the name again. [`InferCtx`] keeps
//! the stack of expressions currently being inferred for one request, and
//! refuses to enter an expression that is already on it. The refused
//! inference yields `Unknown`, which bounds the walk on cyclic definitions.
//!
//! A context belongs to one top-level request. Concurrent requests each
//! build their own, so one request's in-flight expressions never cut
//! another's recursion short.

use std::ops::{Deref, DerefMut};

use lunar_common::{FileId, InFile};
use lunar_syntax::ast::expr::Expr;
use lunar_syntax::{SyntaxKind, TextRange};
use rustc_hash::FxHashMap;

/// Identity of an expression across files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprKey {
    pub file: FileId,
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl ExprKey {
    pub fn of(expr: InFile<&Expr>) -> Self {
        let node = expr.value.syntax();
        ExprKey {
            file: expr.file_id,
            kind: node.kind(),
            range: node.text_range(),
        }
    }
}

/// What a request is allowed to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolveMode {
    /// Follow `require` into other files.
    #[default]
    Full,
    /// Stay inside the current file; `require` calls yield `Unknown`.
    /// Used by indexing passes that must not load other files.
    LocalOnly,
}

/// One expression being inferred.
#[derive(Debug)]
struct Frame {
    key: ExprKey,
    /// Shallowest stack depth a guard refusal inside this frame's subtree
    /// pointed at.
    floor: Option<usize>,
}

/// Request-scoped inference state.
#[derive(Debug, Default)]
pub struct InferCtx {
    mode: ResolveMode,
    stack: Vec<Frame>,
    /// Stack depth of each active key.
    active: FxHashMap<ExprKey, usize>,
}

impl InferCtx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ResolveMode) -> Self {
        InferCtx {
            mode,
            ..Self::default()
        }
    }

    pub fn local_only() -> Self {
        Self::with_mode(ResolveMode::LocalOnly)
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    /// Number of expressions currently being inferred.
    pub fn in_flight(&self) -> usize {
        self.stack.len()
    }

    pub fn is_active(&self, key: &ExprKey) -> bool {
        self.active.contains_key(key)
    }

    /// Enter `key`. Returns `None` if it is already being inferred higher
    /// on this request's stack.
    ///
    /// The returned guard leaves `key` when dropped, on every exit path.
    pub fn enter(&mut self, key: ExprKey) -> Option<Entered<'_>> {
        if let Some(&depth) = self.active.get(&key) {
            if let Some(top) = self.stack.last_mut() {
                lower_floor(&mut top.floor, depth);
            }
            return None;
        }
        let depth = self.stack.len();
        self.stack.push(Frame { key, floor: None });
        self.active.insert(key, depth);
        Some(Entered { ctx: self, depth })
    }

    fn leave(&mut self, depth: usize) {
        while self.stack.len() > depth {
            let Some(frame) = self.stack.pop() else {
                break;
            };
            self.active.remove(&frame.key);
            // A refusal that pointed above the parent truncated the parent too.
            let parent_depth = self.stack.len().saturating_sub(1);
            if let (Some(floor), Some(parent)) = (frame.floor, self.stack.last_mut()) {
                if floor < parent_depth {
                    lower_floor(&mut parent.floor, floor);
                }
            }
        }
    }

    fn is_complete_at(&self, depth: usize) -> bool {
        self.stack
            .get(depth)
            .and_then(|frame| frame.floor)
            .map_or(true, |floor| floor >= depth)
    }
}

fn lower_floor(floor: &mut Option<usize>, depth: usize) {
    *floor = Some(floor.map_or(depth, |f| f.min(depth)));
}

/// An entered guard. Derefs to the context so inference can recurse
/// through it.
#[derive(Debug)]
pub struct Entered<'a> {
    ctx: &'a mut InferCtx,
    depth: usize,
}

impl Entered<'_> {
    /// Whether the result computed under this guard is final.
    ///
    /// False when a refusal somewhere below it pointed at an expression
    /// still in flight above it: the same expression inferred later, from
    /// outside that cycle, may see more. Siblings that never reached the
    /// cycle stay complete.
    pub fn is_complete(&self) -> bool {
        self.ctx.is_complete_at(self.depth)
    }
}

impl Deref for Entered<'_> {
    type Target = InferCtx;

    fn deref(&self) -> &InferCtx {
        &*self.ctx
    }
}

impl DerefMut for Entered<'_> {
    fn deref_mut(&mut self) -> &mut InferCtx {
        &mut *self.ctx
    }
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        self.ctx.leave(self.depth);
    }
}
