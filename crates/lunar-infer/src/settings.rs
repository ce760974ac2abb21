//! Inference settings.
//!
//! Naming conventions the engine cannot derive from code: which member
//! names construct instances, which globals load modules, and where a
//! module path may point. Loaded from TOML; every field has a default.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Tunable naming conventions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct InferSettings {
    /// Member names whose call yields an instance of the owning class.
    pub constructor_names: Vec<String>,
    /// Callee names treated as module-import primitives.
    pub require_functions: Vec<String>,
    /// Candidate module paths, tried in order; `?` stands for the
    /// normalized path from the `require` call.
    pub module_patterns: Vec<String>,
}

impl Default for InferSettings {
    fn default() -> Self {
        InferSettings {
            constructor_names: vec!["new".to_string(), "get".to_string()],
            require_functions: vec!["require".to_string()],
            module_patterns: vec!["?".to_string(), "?/init".to_string()],
        }
    }
}

impl InferSettings {
    pub fn is_constructor_name(&self, name: &str) -> bool {
        self.constructor_names.iter().any(|n| n == name)
    }

    pub fn is_require_function(&self, name: &str) -> bool {
        self.require_functions.iter().any(|n| n == name)
    }

    /// The configured patterns, or `?` alone when none are configured.
    pub fn module_patterns(&self) -> Vec<&str> {
        if self.module_patterns.is_empty() {
            vec!["?"]
        } else {
            self.module_patterns.iter().map(String::as_str).collect()
        }
    }

    /// Parse settings from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Read and parse settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}

/// Failure to load [`InferSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The settings file could not be read.
    Io { path: PathBuf, message: String },
    /// The content is not valid settings TOML.
    Parse(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "failed to read {}: {}", path.display(), message),
            Self::Parse(message) => write!(f, "failed to parse settings: {}", message),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = InferSettings::default();
        assert!(settings.is_constructor_name("new"));
        assert!(settings.is_constructor_name("get"));
        assert!(!settings.is_constructor_name("create"));
        assert!(settings.is_require_function("require"));
        assert_eq!(settings.module_patterns(), vec!["?", "?/init"]);
    }

    #[test]
    fn parse_full_settings() {
        let toml = r#"
constructor-names = ["new", "create"]
require-functions = ["require", "import"]
module-patterns = ["?", "lib/?"]
"#;
        let settings = InferSettings::from_toml_str(toml).unwrap();
        assert!(settings.is_constructor_name("create"));
        assert!(!settings.is_constructor_name("get"));
        assert!(settings.is_require_function("import"));
        assert_eq!(settings.module_patterns(), vec!["?", "lib/?"]);
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let settings = InferSettings::from_toml_str("constructor-names = [\"make\"]").unwrap();
        assert!(settings.is_constructor_name("make"));
        assert!(settings.is_require_function("require"));
    }

    #[test]
    fn empty_patterns_fall_back_to_plain_path() {
        let settings = InferSettings::from_toml_str("module-patterns = []").unwrap();
        assert_eq!(settings.module_patterns(), vec!["?"]);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = InferSettings::from_toml_str("constructors = [\"new\"]").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse settings"));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lunar.toml");
        std::fs::write(&path, "require-functions = [\"load\"]\n").unwrap();
        let settings = InferSettings::from_file(&path).unwrap();
        assert!(settings.is_require_function("load"));
        assert!(!settings.is_require_function("require"));
    }

    #[test]
    fn from_file_missing() {
        let err = InferSettings::from_file(Path::new("/nonexistent/lunar.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
