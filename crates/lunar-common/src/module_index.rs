//! Module index: normalized module paths to files.
//!
//! A `require("net.http")` call names a module, not a file. The host keeps a
//! [`ModuleIndex`] of every Lua file in the workspace under its module path
//! (`"net/http"`, `"net/init"`), and the inference engine asks it for the
//! file behind a normalized path.

use std::path::{Component, Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::file::FileId;

/// Metadata about a single module file.
#[derive(Debug, Clone)]
pub struct ModuleInfo {
    /// The file holding the module.
    pub file: FileId,
    /// Slash-separated module path without extension, e.g. `"net/http"`.
    pub name: String,
    /// Path relative to the workspace root, e.g. `"net/http.lua"`.
    pub path: PathBuf,
}

/// Lookup table from module paths to files.
///
/// Modules are stored in insertion order. Registering a second file under
/// the same module path shadows the first for lookups.
#[derive(Debug, Default)]
pub struct ModuleIndex {
    modules: Vec<ModuleInfo>,
    name_to_id: FxHashMap<String, FileId>,
}

impl ModuleIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file under the module path derived from its relative path.
    ///
    /// `net/http.lua` becomes `net/http`; Windows separators are accepted.
    /// Returns the module path the file was registered under.
    pub fn add_file(&mut self, file: FileId, relative: impl Into<PathBuf>) -> String {
        let path = relative.into();
        let name = module_name_for(&path);
        self.name_to_id.insert(name.clone(), file);
        self.modules.push(ModuleInfo {
            file,
            name: name.clone(),
            path,
        });
        name
    }

    /// Look up the file registered under a normalized module path.
    pub fn resolve(&self, name: &str) -> Option<FileId> {
        self.name_to_id.get(name).copied()
    }

    /// The module registered for `file`, if any.
    pub fn module_of(&self, file: FileId) -> Option<&ModuleInfo> {
        self.modules.iter().rev().find(|m| m.file == file)
    }

    /// Number of registered module files.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }
}

fn module_name_for(path: &Path) -> String {
    let without_ext = path.with_extension("");
    let parts: Vec<String> = without_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    parts.join("/").replace('\\', "/")
}
