//! Lunar inference: best-effort static types for Lua expressions.
//!
//! Lua has no type annotations on expressions, so editor features (hover,
//! completion, diagnostics) need a guess derived from operator semantics,
//! literal shapes, call returns and module linkage. This crate computes
//! that guess. It never rejects a program; when it cannot tell, the answer
//! is [`Ty::Unknown`].
//!
//! # Architecture
//!
//! - [`ty`]: the type model (primitives, functions, classes, unions)
//! - [`union`]: flattening, de-duplicating union construction
//! - [`ops`]: operator and literal typing tables
//! - [`guard`]: per-request context and recursion guard
//! - [`cache`]: host-owned memo table
//! - [`host`]: collaborator traits (trees, names, modules)
//! - [`settings`]: naming conventions loaded from TOML
//! - [`engine`]: the entry point and expression dispatch
//! - [`call`]: call and constructor resolution
//! - [`module`]: `require` resolution

pub mod cache;
pub mod call;
pub mod engine;
pub mod guard;
pub mod host;
pub mod module;
pub mod ops;
pub mod settings;
pub mod ty;
pub mod union;

pub use cache::{CacheKey, SharedTypeCache, TypeCache};
pub use engine::Engine;
pub use guard::{ExprKey, InferCtx, ResolveMode};
pub use host::{Declaration, NameResolver, SourceDatabase};
pub use module::{normalize_module_path, ModuleHandle};
pub use settings::{InferSettings, SettingsError};
pub use ty::{ClassMember, Signature, Ty, TyClass, TyFunction};
pub use union::{TyUnion, UnionBuilder};
