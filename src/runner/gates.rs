//! The preflight gate chain.
//!
//! Gates run in a fixed order: interpreter version, library dependencies,
//! then each external tool. The first failing gate ends the chain:
//!
//! ```text
//! VersionOK -> DepsOK -> git-lfs OK -> bazel OK -> rsync OK -> Ready
//!      \__________\___________\____________\___________\-> Aborted
//! ```
//!
//! A bad interpreter version and a failed install are errors and propagate.
//! A missing tool is an expected outcome: its remediation text is printed
//! and [`PreflightOutcome::Aborted`] is returned for the caller to turn
//! into an exit status.

use crate::config::{BstrapConfig, ToolConfig};
use crate::error::{BstrapError, Result};
use crate::requirements::{
    default_dependencies, ensure_dependencies, missing_dependencies, probe_tool, Dependency,
    Detection, Host, ToolRegistry, ToolRequirement, ToolStatus, VersionRequirement,
};
use crate::ui::UserInterface;
use std::fmt;

/// One step in the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Version,
    Dependencies,
    Tool(String),
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Version => write!(f, "interpreter version"),
            Gate::Dependencies => write!(f, "dependencies"),
            Gate::Tool(name) => write!(f, "tool '{}'", name),
        }
    }
}

/// How a preflight run ended, when it did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreflightOutcome {
    /// Every gate passed.
    Ready,
    /// A gate failed after printing remediation.
    Aborted { gate: Gate },
}

/// What the preflight checks.
#[derive(Debug, Clone)]
pub struct PreflightPlan {
    pub version: VersionRequirement,
    pub dependencies: Vec<Dependency>,
    pub tools: ToolRegistry,
}

impl Default for PreflightPlan {
    fn default() -> Self {
        Self {
            version: VersionRequirement::default(),
            dependencies: default_dependencies(),
            tools: ToolRegistry::builtin(),
        }
    }
}

impl PreflightPlan {
    /// Build a plan from validated config, falling back to built-ins.
    pub fn from_config(config: &BstrapConfig) -> Result<Self> {
        let mut plan = Self::default();

        if let Some(version) = &config.python.version {
            plan.version = version
                .parse()
                .map_err(|message| BstrapError::ConfigValidationError { message })?;
        }

        if let Some(deps) = &config.dependencies {
            plan.dependencies = deps.clone();
        }

        for tool in &config.tools {
            plan.tools.push(tool_from_config(tool)?);
        }

        Ok(plan)
    }
}

fn tool_from_config(tool: &ToolConfig) -> Result<ToolRequirement> {
    let detection = match (&tool.command, &tool.on_path) {
        (Some(command), None) => {
            let mut parts = command.split_whitespace().map(str::to_string);
            let program = parts.next().ok_or_else(|| BstrapError::ConfigValidationError {
                message: format!("Tool '{}' has an empty 'command'", tool.name),
            })?;
            Detection::VersionCommand {
                program,
                args: parts.collect(),
            }
        }
        (None, Some(executable)) => Detection::OnPath {
            executable: executable.clone(),
        },
        _ => {
            return Err(BstrapError::ConfigValidationError {
                message: format!(
                    "Tool '{}' must set exactly one of 'command' or 'on_path'",
                    tool.name
                ),
            })
        }
    };

    let remediation = if tool.remediation.is_empty() {
        vec![format!("'{}' is not installed. Please install it.", tool.name)]
    } else {
        tool.remediation.clone()
    };

    Ok(ToolRequirement {
        name: tool.name.clone(),
        detection,
        remediation,
    })
}

/// Result of a single gate in a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateCheck {
    pub gate: Gate,
    pub passed: bool,
    pub detail: String,
}

/// Every gate evaluated, without installing or stopping early.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreflightReport {
    pub checks: Vec<GateCheck>,
}

impl PreflightReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &GateCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }

    fn record(&mut self, gate: Gate, passed: bool, detail: String) {
        self.checks.push(GateCheck {
            gate,
            passed,
            detail,
        });
    }
}

/// Runs a [`PreflightPlan`] against a [`Host`].
pub struct Preflight<'a> {
    plan: &'a PreflightPlan,
    host: Host<'a>,
}

impl<'a> Preflight<'a> {
    pub fn new(plan: &'a PreflightPlan, host: Host<'a>) -> Self {
        Self { plan, host }
    }

    /// Run the gates in order, stopping at the first failure.
    ///
    /// Passing gates print nothing unless the output mode asks for it.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<PreflightOutcome> {
        let verbose = ui.output_mode().shows_gate_results();

        let version = self.host.interpreter.interpreter_version()?;
        self.plan.version.check(&version)?;
        tracing::debug!("Version gate passed: {}", version);
        if verbose {
            ui.success(&format!("Python {}", version));
        }

        let report = ensure_dependencies(
            &self.plan.dependencies,
            self.host.modules,
            self.host.installer,
            ui,
        )?;
        if report.nothing_installed() {
            tracing::debug!("Dependency gate passed");
        } else {
            tracing::debug!("Dependency gate passed after installing {:?}", report.installed);
        }
        if verbose {
            ui.success(&format!(
                "{} dependencies importable",
                self.plan.dependencies.len()
            ));
        }

        for tool in self.plan.tools.tools() {
            match probe_tool(tool, self.host.paths, self.host.commands) {
                ToolStatus::Present { .. } => {
                    if verbose {
                        ui.success(&tool.name);
                    }
                }
                ToolStatus::Missing => {
                    tracing::debug!("Tool gate failed: {}", tool.name);
                    ui.remediation(&tool.remediation);
                    return Ok(PreflightOutcome::Aborted {
                        gate: Gate::Tool(tool.name.clone()),
                    });
                }
            }
        }

        Ok(PreflightOutcome::Ready)
    }

    /// Evaluate every gate and print a line for each.
    ///
    /// Nothing is installed; missing tools also get their remediation text.
    pub fn report(&self, ui: &mut dyn UserInterface) -> PreflightReport {
        let mut report = PreflightReport::default();
        ui.show_header("Preflight checks");

        match self.host.interpreter.interpreter_version() {
            Ok(version) => {
                let passed = self.plan.version.accepts(&version);
                let detail = if passed {
                    format!("Python {}", version)
                } else {
                    format!(
                        "Python {} (requires {} or higher)",
                        version, self.plan.version
                    )
                };
                report.record(Gate::Version, passed, detail);
            }
            Err(e) => report.record(Gate::Version, false, e.to_string()),
        }
        print_check(ui, report.checks.last());

        let missing = missing_dependencies(&self.plan.dependencies, self.host.modules);
        for dep in &self.plan.dependencies {
            let absent = missing.iter().any(|m| m.module == dep.module);
            let detail = if dep.module == dep.package {
                dep.module.clone()
            } else {
                format!("{} ({})", dep.module, dep.package)
            };
            report.record(Gate::Dependencies, !absent, detail);
            print_check(ui, report.checks.last());
        }
        if !missing.is_empty() {
            ui.warning("Missing dependencies are installed automatically on the next run.");
        }

        for tool in self.plan.tools.tools() {
            let status = probe_tool(tool, self.host.paths, self.host.commands);
            let detail = match &status {
                ToolStatus::Present { path: Some(path) } => {
                    format!("{} ({})", tool.name, path.display())
                }
                _ => tool.name.clone(),
            };
            report.record(Gate::Tool(tool.name.clone()), status.is_present(), detail);
            print_check(ui, report.checks.last());
            if !status.is_present() {
                ui.remediation(&tool.remediation);
            }
        }

        report
    }
}

fn print_check(ui: &mut dyn UserInterface, check: Option<&GateCheck>) {
    if let Some(check) = check {
        if check.passed {
            ui.success(&check.detail);
        } else {
            ui.failure(&check.detail);
        }
    }
}
