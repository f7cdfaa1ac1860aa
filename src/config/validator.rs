//! Configuration validation rules.
//!
//! - `python.version` must be `<major>.<minor>`
//! - Tools need a name and exactly one of `command` / `on_path`
//! - Module and function names must be Python identifiers, since they are
//!   spliced into `-c` source
//! - Package names must not look like installer flags

use crate::config::schema::BstrapConfig;
use crate::error::{BstrapError, Result};
use crate::requirements::VersionRequirement;
use regex::Regex;
use std::sync::OnceLock;

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

fn dotted_identifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
            .expect("identifier regex is valid")
    })
}

/// Whether `name` is a (possibly dotted) Python identifier.
pub fn is_dotted_identifier(name: &str) -> bool {
    dotted_identifier().is_match(name)
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &BstrapConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(version) = &config.python.version {
        if let Err(e) = version.parse::<VersionRequirement>() {
            errors.push(ValidationError::new(
                "python-version",
                format!("python.version: {}", e),
            ));
        }
    }

    for dep in config.dependencies.iter().flatten() {
        if !is_dotted_identifier(&dep.module) {
            errors.push(ValidationError::new(
                "dependency-module",
                format!("Dependency module '{}' is not a valid import name", dep.module),
            ));
        }
        if dep.package.trim().is_empty()
            || dep.package.starts_with('-')
            || dep.package.contains(char::is_whitespace)
        {
            errors.push(ValidationError::new(
                "dependency-package",
                format!("Dependency package '{}' is not a valid package name", dep.package),
            ));
        }
    }

    for (idx, tool) in config.tools.iter().enumerate() {
        let label = if tool.name.trim().is_empty() {
            errors.push(ValidationError::new(
                "tool-name",
                format!("tools[{}] must have a name", idx),
            ));
            format!("tools[{}]", idx)
        } else {
            format!("Tool '{}'", tool.name)
        };

        match (&tool.command, &tool.on_path) {
            (Some(_), Some(_)) | (None, None) => errors.push(ValidationError::new(
                "tool-check",
                format!("{} must set exactly one of 'command' or 'on_path'", label),
            )),
            (Some(command), None) if command.split_whitespace().next().is_none() => {
                errors.push(ValidationError::new(
                    "tool-check",
                    format!("{} has an empty 'command'", label),
                ))
            }
            (None, Some(exe)) if exe.trim().is_empty() => errors.push(ValidationError::new(
                "tool-check",
                format!("{} has an empty 'on_path'", label),
            )),
            _ => {}
        }
    }

    if !is_dotted_identifier(&config.entry.module) {
        errors.push(ValidationError::new(
            "entry-module",
            format!("entry.module '{}' is not a valid module name", config.entry.module),
        ));
    }
    if !is_dotted_identifier(&config.entry.function) || config.entry.function.contains('.') {
        errors.push(ValidationError::new(
            "entry-function",
            format!(
                "entry.function '{}' is not a valid function name",
                config.entry.function
            ),
        ));
    }

    errors
}

/// Validate and fail with every problem joined into one error.
pub fn validate(config: &BstrapConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }
    Err(BstrapError::ConfigValidationError {
        message: errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; "),
    })
}
