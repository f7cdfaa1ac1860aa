//! Check command implementation.
//!
//! The `bstrap check` command evaluates every gate and prints a line per
//! check. It never installs packages and never delegates.

use std::path::{Path, PathBuf};

use crate::cli::args::GlobalOptions;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::setup::PreflightSetup;

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    options: GlobalOptions,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, options: GlobalOptions) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            options,
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let setup = PreflightSetup::load(&self.project_root, &self.options)?;
        ui.message(&format!(
            "Interpreter: {}",
            setup.interpreter().executable().display()
        ));

        let report = setup.preflight().report(ui);
        let failed = report.failures().count();

        if failed == 0 {
            ui.success("All checks passed");
            Ok(CommandResult::ok())
        } else {
            ui.failure(&format!(
                "{} of {} checks failed",
                failed,
                report.checks.len()
            ));
            Ok(CommandResult::exit(1))
        }
    }
}
