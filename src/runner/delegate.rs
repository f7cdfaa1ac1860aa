//! Handing control to the Python entry point.

use crate::config::EntryConfig;
use crate::error::{BstrapError, Result};
use crate::requirements::PythonInterpreter;
use crate::shell::{display_command, execute, CommandOptions, StdioMode};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// The program that runs once preflight passes.
pub trait EntryPoint {
    /// Run to completion and return its exit status.
    fn invoke(&self, args: &[String]) -> Result<i32>;
}

/// Calls `<module>.<function>()` in the bootstrapped interpreter.
#[derive(Debug, Clone)]
pub struct PythonEntryPoint {
    interpreter: PathBuf,
    module: String,
    function: String,
    search_dir: PathBuf,
    replace_process: bool,
}

impl PythonEntryPoint {
    /// `entry.path` is resolved against `project_root`.
    pub fn new(python: &PythonInterpreter, entry: &EntryConfig, project_root: &Path) -> Self {
        Self {
            interpreter: python.executable().to_path_buf(),
            module: entry.module.clone(),
            function: entry.function.clone(),
            search_dir: project_root.join(&entry.path),
            replace_process: false,
        }
    }

    /// On unix, `exec` the interpreter instead of spawning a child. Ctrl-C
    /// then reaches Python alone. Elsewhere this has no effect.
    pub fn replacing_process(mut self) -> Self {
        self.replace_process = true;
        self
    }

    /// Source passed to `-c`.
    ///
    /// `sys.argv[0]` is set to the module name so the entry point's usage
    /// text does not say `-c`.
    pub fn source(&self) -> String {
        format!(
            "import sys; sys.argv[0] = '{module}'; from {module} import {function}; {function}()",
            module = self.module,
            function = self.function
        )
    }

    /// `PYTHONPATH` with the entry directory first.
    fn python_path(&self) -> Result<String> {
        let mut dirs = vec![self.search_dir.clone()];
        if let Some(existing) = std::env::var_os("PYTHONPATH") {
            dirs.extend(std::env::split_paths(&existing));
        }
        let joined: OsString = std::env::join_paths(dirs)
            .map_err(|e| anyhow::anyhow!("Cannot build PYTHONPATH: {}", e))?;
        joined.into_string().map_err(|raw| {
            BstrapError::Other(anyhow::anyhow!(
                "PYTHONPATH is not valid UTF-8: {}",
                raw.to_string_lossy()
            ))
        })
    }
}

impl EntryPoint for PythonEntryPoint {
    fn invoke(&self, args: &[String]) -> Result<i32> {
        let mut options = CommandOptions {
            stdio: StdioMode::Inherit,
            ..Default::default()
        };
        options
            .env
            .insert("PYTHONPATH".to_string(), self.python_path()?);

        let mut argv = vec!["-c".to_string(), self.source()];
        argv.extend(args.iter().cloned());

        tracing::info!(
            "Delegating to {}.{}: {}",
            self.module,
            self.function,
            display_command(&self.interpreter, &argv)
        );

        #[cfg(unix)]
        if self.replace_process {
            return Err(self.exec(&argv, &options));
        }

        let result = execute(&self.interpreter, &argv, &options)?;
        // Killed by a signal: no code to forward.
        Ok(result.exit_code.unwrap_or(1))
    }
}

#[cfg(unix)]
impl PythonEntryPoint {
    /// Only returns if `exec` failed.
    fn exec(&self, argv: &[String], options: &CommandOptions) -> BstrapError {
        use std::os::unix::process::CommandExt;

        let err = std::process::Command::new(&self.interpreter)
            .args(argv)
            .envs(&options.env)
            .exec();
        BstrapError::CommandFailed {
            command: display_command(&self.interpreter, argv),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> PythonEntryPoint {
        PythonEntryPoint::new(
            &PythonInterpreter::new("/usr/bin/python3"),
            &EntryConfig::default(),
            Path::new("/work/repo"),
        )
    }

    #[test]
    fn source_imports_and_calls_function() {
        let source = entry().source();
        assert!(source.contains("from b import entrypoint; entrypoint()"));
        assert!(source.contains("sys.argv[0] = 'b'"));
    }

    #[test]
    fn search_dir_is_under_project_root() {
        let entry = entry();
        assert_eq!(entry.search_dir, Path::new("/work/repo").join("scripts").join("b"));
    }

    #[test]
    fn python_path_starts_with_entry_dir() {
        let entry = entry();
        let path = entry.python_path().unwrap();
        let first = std::env::split_paths(&path).next().unwrap();
        assert_eq!(first, entry.search_dir);
    }

    #[cfg(unix)]
    #[test]
    fn invoke_forwards_exit_status_and_args() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        // A stand-in interpreter: exits with the number of forwarded args
        // (everything after `-c <source>`).
        let temp = tempfile::TempDir::new().unwrap();
        let fake = temp.path().join("python3");
        fs::write(&fake, "#!/bin/sh\nshift 2\nexit $#\n").unwrap();
        fs::set_permissions(&fake, fs::Permissions::from_mode(0o755)).unwrap();

        let entry = PythonEntryPoint::new(
            &PythonInterpreter::new(&fake),
            &EntryConfig::default(),
            temp.path(),
        );

        let code = entry
            .invoke(&["deploy".to_string(), "--fast".to_string(), "x".to_string()])
            .unwrap();
        assert_eq!(code, 3);
    }

    #[cfg(unix)]
    #[test]
    fn failed_exec_is_reported_not_forwarded() {
        let temp = tempfile::TempDir::new().unwrap();
        let entry = PythonEntryPoint::new(
            &PythonInterpreter::new(temp.path().join("python3")),
            &EntryConfig::default(),
            temp.path(),
        )
        .replacing_process();

        let err = entry.invoke(&["dev".to_string()]).unwrap_err();

        assert!(matches!(err, BstrapError::CommandFailed { .. }));
        let msg = err.to_string();
        assert!(msg.contains("python3 -c"), "{}", msg);
        assert!(msg.contains(" dev: "), "{}", msg);
    }
}
