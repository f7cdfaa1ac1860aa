//! External tool requirements and their probes.
//!
//! A tool is detected either by running a cheap version command or by
//! looking its executable up on the search path. Probing never ends the
//! process; callers decide what a missing tool means.

use super::host::{CommandProbe, PathResolver};
use crate::shell::display_command;
use std::path::PathBuf;

/// How a tool's presence is detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Run a command with output discarded; exit 0 means present.
    VersionCommand { program: String, args: Vec<String> },
    /// Resolve an executable on the search path.
    OnPath { executable: String },
}

impl Detection {
    pub fn version_command(program: &str, args: &[&str]) -> Self {
        Detection::VersionCommand {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn on_path(executable: &str) -> Self {
        Detection::OnPath {
            executable: executable.to_string(),
        }
    }

    /// Short description for reports.
    pub fn describe(&self) -> String {
        match self {
            Detection::VersionCommand { program, args } => {
                format!("`{}` succeeds", display_command(program, args))
            }
            Detection::OnPath { executable } => format!("`{}` on PATH", executable),
        }
    }
}

/// An external executable the entry point depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequirement {
    pub name: String,
    pub detection: Detection,
    /// Lines printed verbatim when the tool is missing.
    pub remediation: Vec<String>,
}

impl ToolRequirement {
    pub fn new(name: &str, detection: Detection, remediation: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            detection,
            remediation: remediation.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Result of probing one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// Found; `path` is known for path lookups only.
    Present { path: Option<PathBuf> },
    Missing,
}

impl ToolStatus {
    pub fn is_present(&self) -> bool {
        matches!(self, ToolStatus::Present { .. })
    }
}

/// Check whether a tool is available.
pub fn probe_tool(
    tool: &ToolRequirement,
    paths: &dyn PathResolver,
    commands: &dyn CommandProbe,
) -> ToolStatus {
    let status = match &tool.detection {
        Detection::VersionCommand { program, args } => {
            if commands.succeeds(program, args) {
                ToolStatus::Present { path: None }
            } else {
                ToolStatus::Missing
            }
        }
        Detection::OnPath { executable } => match paths.which(executable) {
            Some(path) => ToolStatus::Present { path: Some(path) },
            None => ToolStatus::Missing,
        },
    };
    tracing::debug!(
        "Tool '{}' ({}): {:?}",
        tool.name,
        tool.detection.describe(),
        status
    );
    status
}

/// Ordered set of tools checked by the preflight.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolRequirement>,
}

impl ToolRegistry {
    /// The tools the `b` entry point needs: git-lfs, bazel and rsync.
    pub fn builtin() -> Self {
        Self {
            tools: vec![
                ToolRequirement::new(
                    "git-lfs",
                    Detection::version_command("git", &["lfs", "version"]),
                    &[
                        "git-lfs is not installed. Please install it: https://git-lfs.github.com/",
                        "Once installed, you need to run: git lfs pull",
                    ],
                ),
                ToolRequirement::new(
                    "bazel",
                    Detection::on_path("bazel"),
                    &[
                        "Bazel is not installed. Please install it: https://bazel.build/install",
                        "  An easy way to install it is by running:",
                        "",
                        "    npm install -g @bazel/bazelisk",
                        "",
                    ],
                ),
                // Used to copy generated files into place; absent from some
                // minimal Linux images.
                ToolRequirement::new(
                    "rsync",
                    Detection::on_path("rsync"),
                    &["'rsync' is not installed. Please install it (e.g. with `sudo apt install rsync`)."],
                ),
            ],
        }
    }

    /// Append a tool after the existing ones.
    pub fn push(&mut self, tool: ToolRequirement) {
        self.tools.push(tool);
    }

    pub fn get(&self, name: &str) -> Option<&ToolRequirement> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn tools(&self) -> &[ToolRequirement] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
