//! Subprocess execution.
//!
//! Commands are spawned directly from an argv (no intermediate shell) so
//! that interpreter paths and package names are passed through verbatim.

use crate::error::{BstrapError, Result};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::process::{Command, Stdio};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: Option<i32>, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            success: false,
        }
    }

    /// Stdout followed by stderr, for tools that report on either stream.
    pub fn combined_output(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// What to do with a child's output streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdioMode {
    /// Share the parent's stdout/stderr.
    #[default]
    Inherit,
    /// Capture into the [`CommandResult`].
    Capture,
    /// Send to the null device.
    Discard,
}

impl StdioMode {
    fn stdio(self) -> Stdio {
        match self {
            StdioMode::Inherit => Stdio::inherit(),
            StdioMode::Capture => Stdio::piped(),
            StdioMode::Discard => Stdio::null(),
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Output handling for stdout and stderr.
    pub stdio: StdioMode,
}

/// Render an argv for logs and error messages.
pub fn display_command<S: AsRef<OsStr>>(program: impl AsRef<OsStr>, args: &[S]) -> String {
    std::iter::once(program.as_ref())
        .chain(args.iter().map(|a| a.as_ref()))
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Execute a program with arguments and wait for it to finish.
///
/// Returns `Err` only when the process cannot be spawned or waited on;
/// a non-zero exit is reported through [`CommandResult::success`].
pub fn execute<S: AsRef<OsStr>>(
    program: impl AsRef<OsStr>,
    args: &[S],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let program = program.as_ref();
    let rendered = display_command(program, args);

    let mut cmd = Command::new(program);
    cmd.args(args);

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::inherit());
    cmd.stdout(options.stdio.stdio());
    cmd.stderr(options.stdio.stdio());

    tracing::debug!("Executing: {}", rendered);

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to spawn {}: {}", rendered, e);
        BstrapError::CommandFailed {
            command: rendered.clone(),
            message: e.to_string(),
        }
    })?;

    let (stdout, stderr) = if options.stdio == StdioMode::Capture {
        (
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
        )
    } else {
        (String::new(), String::new())
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr))
    } else {
        Ok(CommandResult::failure(output.status.code(), stdout, stderr))
    }
}

/// Run a program with output discarded and report whether it exited 0.
///
/// Spawn errors (including a missing executable) count as failure.
pub fn execute_check<S: AsRef<OsStr>>(program: impl AsRef<OsStr>, args: &[S]) -> bool {
    let options = CommandOptions {
        stdio: StdioMode::Discard,
        ..Default::default()
    };

    execute(program, args, &options)
        .map(|r| r.success)
        .unwrap_or(false)
}

/// Run a program and capture both output streams.
pub fn execute_captured<S: AsRef<OsStr>>(
    program: impl AsRef<OsStr>,
    args: &[S],
) -> Result<CommandResult> {
    let options = CommandOptions {
        stdio: StdioMode::Capture,
        ..Default::default()
    };
    execute(program, args, &options)
}
