//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layering in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use bstrap::config::{load_merged_config, validate};
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".bstrap");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "python:\n  version: '3.10'\n").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.python.version.as_deref(), Some("3.10"));
//! ```
//!
//! # Configuration File Locations
//!
//! 1. Project config (`.bstrap/config.yml`)
//! 2. Local overrides (`.bstrap/config.local.yml`)
//!
//! Both are optional. Without them the built-in defaults apply.

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use schema::{BstrapConfig, EntryConfig, PythonConfig, ToolConfig};

pub use loader::{
    load_config, load_config_file, load_config_value, load_merged_config, parse_config,
    ConfigPaths, CONFIG_DIR,
};

pub use merger::{deep_merge, merge_configs};

pub use validator::{is_dotted_identifier, validate, validate_config, ValidationError};
