//! Routing from parsed arguments to a [`Command`].

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::check::CheckCommand;
use super::run::RunCommand;

/// A subcommand ready to execute.
pub trait Command {
    /// Execute, writing notices, check lines and remediation to `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Process exit status a command asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
}

impl CommandResult {
    pub fn ok() -> Self {
        Self { exit_code: 0 }
    }

    /// Any status, including one forwarded from a delegated process.
    pub fn exit(exit_code: i32) -> Self {
        Self { exit_code }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Picks the command for a parsed [`Cli`] and runs it against one project.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// No subcommand means `run` with the top-level trailing arguments.
    fn command_for(&self, cli: &Cli) -> Box<dyn Command> {
        let options = cli.global_options();
        match &cli.command {
            Some(Commands::Check(_)) => Box::new(CheckCommand::new(&self.project_root, options)),
            Some(Commands::Run(args)) => {
                Box::new(RunCommand::new(&self.project_root, options, args.clone()))
            }
            None => {
                let args = RunArgs {
                    args: cli.args.clone(),
                };
                Box::new(RunCommand::new(&self.project_root, options, args))
            }
        }
    }

    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.command_for(cli).execute(ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BstrapError;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn exit_status_decides_success() {
        assert!(CommandResult::ok().is_success());
        assert_eq!(CommandResult::ok().exit_code, 0);
        let forwarded = CommandResult::exit(42);
        assert!(!forwarded.is_success());
        assert_eq!(forwarded.exit_code, 42);
    }

    #[test]
    fn dispatcher_keeps_project_root() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/work/repo"));
        assert_eq!(dispatcher.project_root(), Path::new("/work/repo"));
    }

    #[test]
    fn every_form_loads_the_project_config() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".bstrap");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), "python:\n  version: latest\n").unwrap();
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());

        for argv in [
            vec!["bstrap"],
            vec!["bstrap", "dev"],
            vec!["bstrap", "run", "--", "dev"],
            vec!["bstrap", "check"],
        ] {
            let cli = Cli::parse_from(argv.iter().copied());
            let err = dispatcher.dispatch(&cli, &mut MockUI::new()).unwrap_err();
            assert!(
                matches!(err, BstrapError::ConfigValidationError { .. }),
                "{:?}: {}",
                argv,
                err
            );
        }
    }
}
