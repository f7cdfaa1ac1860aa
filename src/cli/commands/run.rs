//! Run command implementation.
//!
//! The `bstrap run` command gates the environment, then hands over to the
//! dev CLI entry point.

use std::path::{Path, PathBuf};

use crate::cli::args::{GlobalOptions, RunArgs};
use crate::error::Result;
use crate::runner::bootstrap;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::setup::PreflightSetup;

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    options: GlobalOptions,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, options: GlobalOptions, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            options,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let setup = PreflightSetup::load(&self.project_root, &self.options)?;
        let entry = setup.entry_point().replacing_process();

        let code = bootstrap(&setup.preflight(), &entry, &self.args.args, ui)?;
        Ok(CommandResult::exit(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BstrapError;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn run_command_keeps_forwarded_args() {
        let args = RunArgs {
            args: vec!["dev".into(), "--watch".into()],
        };
        let cmd = RunCommand::new(Path::new("/work"), GlobalOptions::default(), args);
        assert_eq!(cmd.args().args, ["dev", "--watch"]);
    }

    #[test]
    fn run_command_surfaces_config_errors() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".bstrap");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), "python:\n  version: latest\n").unwrap();

        let cmd = RunCommand::new(temp.path(), GlobalOptions::default(), RunArgs::default());
        let mut ui = MockUI::new();
        let err = cmd.execute(&mut ui).unwrap_err();

        assert!(matches!(err, BstrapError::ConfigValidationError { .. }));
        assert!(ui.is_silent());
    }
}
