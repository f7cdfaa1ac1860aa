//! Executable lookup on the OS search path.
//!
//! Lookups iterate `PATH` entries directly instead of shelling out to
//! `which`, whose behavior varies across systems and is sometimes a shell
//! builtin with inconsistent error handling.
//!
//! # Example
//!
//! ```no_run
//! use bstrap::requirements::probe::SearchPath;
//! use bstrap::requirements::PathResolver;
//!
//! let path = SearchPath::from_env();
//! if let Some(rsync) = path.which("rsync") {
//!     println!("rsync at {}", rsync.display());
//! }
//! ```

use super::host::PathResolver;
use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// File names to try for a tool in each PATH directory.
#[cfg(windows)]
fn candidate_names(tool: &str) -> Vec<String> {
    if Path::new(tool).extension().is_some() {
        return vec![tool.to_string()];
    }
    let exts = std::env::var("PATHEXT").unwrap_or_else(|_| ".EXE;.CMD;.BAT;.COM".to_string());
    std::iter::once(tool.to_string())
        .chain(
            exts.split(';')
                .filter(|e| !e.is_empty())
                .map(|ext| format!("{}{}", tool, ext.to_lowercase())),
        )
        .collect()
}

#[cfg(not(windows))]
fn candidate_names(tool: &str) -> Vec<String> {
    vec![tool.to_string()]
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let names = candidate_names(tool);
    for dir in path_entries {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// A snapshot of executable search directories.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    entries: Vec<PathBuf>,
}

impl SearchPath {
    /// Snapshot the process `PATH`.
    pub fn from_env() -> Self {
        Self::new(parse_system_path())
    }

    /// Use an explicit list of directories.
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    /// Directories in lookup order.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }
}

impl PathResolver for SearchPath {
    fn which(&self, executable: &str) -> Option<PathBuf> {
        let as_path = Path::new(executable);
        // Anything with a directory component is used as given.
        if as_path.components().count() > 1 || as_path.is_absolute() {
            return (as_path.is_file() && is_executable(as_path)).then(|| as_path.to_path_buf());
        }
        resolve_tool_path(executable, &self.entries)
    }
}
