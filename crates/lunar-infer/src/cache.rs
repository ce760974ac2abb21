//! Memo table for inferred types.
//!
//! The cache belongs to the host, which decides its lifetime and when to
//! drop stale entries; the engine only reads through it and writes
//! complete results back. Types are immutable, so one cache can serve
//! concurrent requests. Two requests racing on the same key compute the
//! same type, so whichever write lands last is fine.

use std::sync::{PoisonError, RwLock};

use lunar_common::FileId;
use rustc_hash::FxHashMap;

use crate::guard::{ExprKey, ResolveMode};
use crate::ty::Ty;

/// Cache key: the expression and the context it was inferred under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub expr: ExprKey,
    pub mode: ResolveMode,
}

impl CacheKey {
    pub fn new(expr: ExprKey, mode: ResolveMode) -> Self {
        CacheKey { expr, mode }
    }
}

/// Get-or-compute storage consulted by the engine.
pub trait TypeCache {
    fn get(&self, key: &CacheKey) -> Option<Ty>;
    fn insert(&self, key: CacheKey, ty: Ty);
}

/// A thread-safe [`TypeCache`].
#[derive(Debug, Default)]
pub struct SharedTypeCache {
    map: RwLock<FxHashMap<CacheKey, Ty>>,
}

impl SharedTypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry for expressions in `file`.
    ///
    /// Entries in other files that reached into `file` through `require`
    /// are kept; hosts that edit a module should `clear()` instead.
    pub fn invalidate_file(&self, file: FileId) {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|key, _| key.expr.file != file);
    }

    pub fn clear(&self) {
        self.map.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl TypeCache for SharedTypeCache {
    fn get(&self, key: &CacheKey) -> Option<Ty> {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn insert(&self, key: CacheKey, ty: Ty) {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, ty);
    }
}
