//! Configuration file discovery and loading.
//!
//! Merge order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Project config (`.bstrap/config.yml`)
//! 3. Local overrides (`.bstrap/config.local.yml`)

use crate::config::merger::merge_configs;
use crate::config::schema::BstrapConfig;
use crate::error::{BstrapError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project config, relative to the project root.
pub const CONFIG_DIR: &str = ".bstrap";

/// Paths to configuration files in priority order.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .bstrap/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .bstrap/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let dir = project_root.join(CONFIG_DIR);
        Self {
            project: existing(dir.join("config.yml")),
            project_local: existing(dir.join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BstrapError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BstrapError::Io(e)
        }
    })
}

/// Parse YAML content into a config.
///
/// An empty document is the default config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<BstrapConfig> {
    if content.trim().is_empty() {
        return Ok(BstrapConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| BstrapError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<BstrapConfig> {
    let content = read_config(path)?;
    parse_config(&content, path)
}

/// Load a config file as a raw YAML value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read_config(path)?;
    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }
    serde_yaml::from_str(&content).map_err(|e| BstrapError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge the project's config files.
///
/// Missing files are fine; with none present this is the default config.
pub fn load_merged_config(project_root: &Path) -> Result<BstrapConfig> {
    let paths = ConfigPaths::discover(project_root);
    let existing = paths.all_existing();

    if existing.is_empty() {
        tracing::debug!("No config under {}, using defaults", project_root.display());
        return Ok(BstrapConfig::default());
    }

    let mut layers = Vec::new();
    for path in existing {
        tracing::debug!("Loading config {}", path.display());
        layers.push(load_config_value(path)?);
    }

    let merged = merge_configs(&layers);
    serde_yaml::from_value(merged).map_err(|e| BstrapError::ConfigParseError {
        path: project_root.join(CONFIG_DIR).join("config.yml"),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<BstrapConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(project_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(root: &Path, name: &str, content: &str) -> PathBuf {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn discover_finds_nothing_in_empty_project() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.all_existing().is_empty());
    }

    #[test]
    fn discover_finds_project_and_local() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "{}");
        write_config(temp.path(), "config.local.yml", "{}");

        let paths = ConfigPaths::discover(temp.path());
        let existing = paths.all_existing();
        assert_eq!(existing.len(), 2);
        assert!(existing[0].ends_with("config.yml"));
        assert!(existing[1].ends_with("config.local.yml"));
    }

    #[test]
    fn missing_config_is_default() {
        let temp = TempDir::new().unwrap();
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config, BstrapConfig::default());
    }

    #[test]
    fn local_overrides_project() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "config.yml",
            "python:\n  executable: python3\n  version: '3.10'\n",
        );
        write_config(
            temp.path(),
            "config.local.yml",
            "python:\n  executable: /opt/py/bin/python3\n",
        );

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(
            config.python.executable.as_deref(),
            Some("/opt/py/bin/python3")
        );
        assert_eq!(config.python.version.as_deref(), Some("3.10"));
    }

    #[test]
    fn empty_file_is_default() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "");
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config, BstrapConfig::default());
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "dependencies: [unclosed");
        let err = load_merged_config(temp.path()).unwrap_err();
        assert!(matches!(err, BstrapError::ConfigParseError { .. }));
    }

    #[test]
    fn override_loads_only_that_file() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "entry: { module: ignored }");
        let other = temp.path().join("other.yml");
        fs::write(&other, "entry: { module: chosen }").unwrap();

        let config = load_config(temp.path(), Some(&other)).unwrap();
        assert_eq!(config.entry.module, "chosen");
    }

    #[test]
    fn missing_override_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_config(temp.path(), Some(&temp.path().join("nope.yml"))).unwrap_err();
        assert!(matches!(err, BstrapError::ConfigNotFound { .. }));
    }
}
