//! Configuration schema definitions.
//!
//! This module contains the structs that map to `.bstrap/config.yml`.
//! Every field is optional; an absent file means built-in defaults.

use crate::requirements::Dependency;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `.bstrap/config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BstrapConfig {
    /// Interpreter selection and version bounds
    pub python: PythonConfig,

    /// Replaces the default dependency list when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<Dependency>>,

    /// Extra tools, checked after the built-in ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolConfig>,

    /// Entry point handed control after preflight
    pub entry: EntryConfig,
}

/// Interpreter settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonConfig {
    /// Executable name or path (default: first of python3, python on PATH)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,

    /// Supported range as "<major>.<minimum minor>" (default: "3.9")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A project-specific tool requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Display name
    pub name: String,

    /// Version command; present when it exits 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Executable looked up on PATH
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_path: Option<String>,

    /// Lines printed when the tool is missing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remediation: Vec<String>,
}

/// Python entry point to delegate to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryConfig {
    /// Module imported from `path`
    pub module: String,

    /// Zero-argument function called in that module
    pub function: String,

    /// Directory prepended to PYTHONPATH, relative to the project root
    pub path: PathBuf,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            module: "b".to_string(),
            function: "entrypoint".to_string(),
            path: PathBuf::from("scripts").join("b"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_is_default() {
        let config: BstrapConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, BstrapConfig::default());
        assert!(config.dependencies.is_none());
        assert_eq!(config.entry.module, "b");
        assert_eq!(config.entry.function, "entrypoint");
    }

    #[test]
    fn parses_full_config() {
        let yaml = r#"
python:
  executable: python3.11
  version: "3.10"
dependencies:
  - click
  - { module: dotenv, package: python-dotenv }
tools:
  - name: jq
    on_path: jq
    remediation: ["Install jq"]
  - name: docker
    command: docker info
entry:
  module: dev
  function: main
  path: tools/dev
"#;
        let config: BstrapConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.python.executable.as_deref(), Some("python3.11"));
        assert_eq!(config.python.version.as_deref(), Some("3.10"));
        let deps = config.dependencies.unwrap();
        assert_eq!(deps[1], Dependency::aliased("dotenv", "python-dotenv"));
        assert_eq!(config.tools.len(), 2);
        assert_eq!(config.tools[1].command.as_deref(), Some("docker info"));
        assert_eq!(config.entry.path, PathBuf::from("tools/dev"));
    }

    #[test]
    fn partial_entry_keeps_defaults() {
        let config: BstrapConfig = serde_yaml::from_str("entry:\n  function: run\n").unwrap();
        assert_eq!(config.entry.module, "b");
        assert_eq!(config.entry.function, "run");
    }
}
