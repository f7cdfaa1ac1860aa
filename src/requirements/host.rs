//! Host seams used by the preflight gates.
//!
//! Every piece of global state the gates consult (the interpreter, its
//! import machinery, the package installer, the search path and external
//! commands) sits behind a trait so tests can substitute fakes.

use super::interpreter::InterpreterVersion;
use crate::error::Result;
use crate::shell::execute_check;
use std::path::PathBuf;

/// Reports the version of the interpreter being bootstrapped.
pub trait VersionSource {
    fn interpreter_version(&self) -> Result<InterpreterVersion>;
}

/// Answers whether a module can be imported by the interpreter.
pub trait ModuleOracle {
    /// Any probe failure counts as "not importable".
    fn is_importable(&self, module: &str) -> bool;
}

/// Installs a package into the interpreter's environment.
pub trait PackageInstaller {
    /// Errors when the installer cannot run or exits unsuccessfully.
    fn install(&self, package: &str) -> Result<()>;
}

/// Resolves executable names against a search path.
pub trait PathResolver {
    fn which(&self, executable: &str) -> Option<PathBuf>;
}

/// Runs a command purely for its exit status.
pub trait CommandProbe {
    /// True only when the command spawned and exited 0.
    fn succeeds(&self, program: &str, args: &[String]) -> bool;
}

/// Runs probe commands as real subprocesses with output discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommands;

impl CommandProbe for SystemCommands {
    fn succeeds(&self, program: &str, args: &[String]) -> bool {
        execute_check(program, args)
    }
}

/// Borrowed bundle of host seams handed to the preflight driver.
#[derive(Clone, Copy)]
pub struct Host<'a> {
    pub interpreter: &'a dyn VersionSource,
    pub modules: &'a dyn ModuleOracle,
    pub installer: &'a dyn PackageInstaller,
    pub paths: &'a dyn PathResolver,
    pub commands: &'a dyn CommandProbe,
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn system_commands_reports_exit_status() {
        let probe = SystemCommands;
        assert!(probe.succeeds("sh", &["-c".to_string(), "exit 0".to_string()]));
        assert!(!probe.succeeds("sh", &["-c".to_string(), "exit 1".to_string()]));
    }

    #[test]
    fn system_commands_treats_missing_program_as_failure() {
        let probe = SystemCommands;
        assert!(!probe.succeeds("bstrap-no-such-tool", &["version".to_string()]));
    }
}
