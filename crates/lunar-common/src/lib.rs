//! Shared types for the Lunar tooling backend.
//!
//! Holds the pieces every other crate needs to agree on: how a source file
//! is identified ([`FileId`], [`InFile`]) and how module paths map to files
//! ([`ModuleIndex`]).

pub mod file;
pub mod module_index;

pub use file::{FileId, InFile};
pub use module_index::{ModuleIndex, ModuleInfo};
