//! Python interpreter discovery and the version gate.
//!
//! The interpreter resolved here is the one every later gate uses: module
//! probes, `pip install` and the final delegation all run through the same
//! executable path, so packages land in the environment that will import them.

use super::host::{ModuleOracle, PackageInstaller, PathResolver, VersionSource};
use crate::error::{BstrapError, Result};
use crate::shell::{execute, execute_captured, execute_check, CommandOptions, StdioMode};
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

/// Executable names tried, in order, when no interpreter is configured.
pub const DEFAULT_CANDIDATES: &[&str] = &["python3", "python"];

/// A parsed `major.minor.patch` interpreter version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct InterpreterVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Python\s+(\d+)\.(\d+)(?:\.(\d+))?").expect("version regex is valid")
    })
}

impl InterpreterVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extract a version from `python --version` output.
    ///
    /// Accepts pre-release suffixes (`Python 3.13.0rc1`) and a missing
    /// patch component.
    pub fn parse(output: &str) -> Option<Self> {
        let caps = version_regex().captures(output)?;
        let major = caps.get(1)?.as_str().parse().ok()?;
        let minor = caps.get(2)?.as_str().parse().ok()?;
        let patch = caps
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        Some(Self::new(major, minor, patch))
    }
}

impl fmt::Display for InterpreterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Supported interpreter range: an exact major and a minimum minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRequirement {
    pub major: u32,
    pub min_minor: u32,
}

impl Default for VersionRequirement {
    fn default() -> Self {
        Self {
            major: 3,
            min_minor: 9,
        }
    }
}

impl VersionRequirement {
    /// Whether `version` falls inside the supported range.
    pub fn accepts(&self, version: &InterpreterVersion) -> bool {
        version.major == self.major && version.minor >= self.min_minor
    }

    /// The version gate.
    pub fn check(&self, version: &InterpreterVersion) -> Result<()> {
        if self.accepts(version) {
            Ok(())
        } else {
            Err(BstrapError::UnsupportedInterpreter {
                required: self.to_string(),
                found: version.to_string(),
            })
        }
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.min_minor)
    }
}

impl FromStr for VersionRequirement {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (major, minor) = s
            .trim()
            .split_once('.')
            .ok_or_else(|| format!("expected '<major>.<minor>', got '{}'", s))?;
        let major = major
            .parse()
            .map_err(|_| format!("invalid major version in '{}'", s))?;
        let min_minor = minor
            .parse()
            .map_err(|_| format!("invalid minor version in '{}'", s))?;
        Ok(Self { major, min_minor })
    }
}

/// A concrete Python executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonInterpreter {
    executable: PathBuf,
}

impl PythonInterpreter {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl VersionSource for PythonInterpreter {
    fn interpreter_version(&self) -> Result<InterpreterVersion> {
        let result = execute_captured(&self.executable, &["--version"])?;
        if !result.success {
            return Err(BstrapError::VersionUnreadable {
                interpreter: self.executable.clone(),
                message: format!("'--version' exited with {:?}", result.exit_code),
            });
        }

        // Python 2 reports its version on stderr.
        let output = result.combined_output();
        InterpreterVersion::parse(&output).ok_or_else(|| {
            tracing::warn!("Unrecognized version output: {:?}", output.trim());
            BstrapError::VersionUnreadable {
                interpreter: self.executable.clone(),
                message: format!("unrecognized output '{}'", output.trim()),
            }
        })
    }
}

impl ModuleOracle for PythonInterpreter {
    fn is_importable(&self, module: &str) -> bool {
        let code = format!("import {}", module);
        execute_check(&self.executable, &["-c", code.as_str()])
    }
}

impl PackageInstaller for PythonInterpreter {
    fn install(&self, package: &str) -> Result<()> {
        let options = CommandOptions {
            stdio: StdioMode::Inherit,
            ..Default::default()
        };
        let result = execute(
            &self.executable,
            &["-m", "pip", "install", package],
            &options,
        )?;

        if result.success {
            Ok(())
        } else {
            Err(BstrapError::InstallFailed {
                package: package.to_string(),
                code: result.exit_code,
            })
        }
    }
}

/// Locate the interpreter to bootstrap.
///
/// An explicit executable (path or bare name) wins; otherwise the first of
/// [`DEFAULT_CANDIDATES`] found on the search path is used.
pub fn discover_interpreter(
    explicit: Option<&str>,
    paths: &dyn PathResolver,
) -> Result<PythonInterpreter> {
    if let Some(name) = explicit {
        return paths
            .which(name)
            .map(PythonInterpreter::new)
            .ok_or_else(|| BstrapError::InterpreterNotFound {
                message: format!("'{}' is not an executable file or on PATH", name),
            });
    }

    DEFAULT_CANDIDATES
        .iter()
        .find_map(|candidate| paths.which(candidate))
        .map(PythonInterpreter::new)
        .ok_or_else(|| BstrapError::InterpreterNotFound {
            message: format!("none of {} found on PATH", DEFAULT_CANDIDATES.join(", ")),
        })
}
