//! Shared preparation for `run` and `check`.

use std::path::{Path, PathBuf};

use crate::cli::args::GlobalOptions;
use crate::config::{load_config, validate, BstrapConfig};
use crate::error::Result;
use crate::requirements::{
    discover_interpreter, Host, PythonInterpreter, SearchPath, SystemCommands,
};
use crate::runner::{Preflight, PreflightPlan, PythonEntryPoint};

/// Loaded config, resolved interpreter and the real host seams.
pub struct PreflightSetup {
    project_root: PathBuf,
    config: BstrapConfig,
    plan: PreflightPlan,
    interpreter: PythonInterpreter,
    paths: SearchPath,
    commands: SystemCommands,
}

impl PreflightSetup {
    /// Load and validate config, then locate the interpreter.
    ///
    /// The interpreter comes from `--python`/`BSTRAP_PYTHON`, then
    /// `python.executable`, then the first default candidate on `PATH`.
    /// A relative flag value resolves against the cwd; a relative config
    /// path resolves against the project root, like `entry.path`.
    pub fn load(project_root: &Path, options: &GlobalOptions) -> Result<Self> {
        let config = load_config(project_root, options.config.as_deref())?;
        validate(&config)?;
        let plan = PreflightPlan::from_config(&config)?;

        let paths = SearchPath::from_env();
        let explicit = match (&options.python, &config.python.executable) {
            (Some(flag), _) => Some(flag.clone()),
            (None, Some(configured)) => Some(configured_executable(project_root, configured)),
            (None, None) => None,
        };
        let interpreter = discover_interpreter(explicit.as_deref(), &paths)?;
        tracing::debug!("Using interpreter {}", interpreter.executable().display());

        Ok(Self {
            project_root: project_root.to_path_buf(),
            config,
            plan,
            interpreter,
            paths,
            commands: SystemCommands,
        })
    }

    pub fn interpreter(&self) -> &PythonInterpreter {
        &self.interpreter
    }

    pub fn plan(&self) -> &PreflightPlan {
        &self.plan
    }

    pub fn host(&self) -> Host<'_> {
        Host {
            interpreter: &self.interpreter,
            modules: &self.interpreter,
            installer: &self.interpreter,
            paths: &self.paths,
            commands: &self.commands,
        }
    }

    pub fn preflight(&self) -> Preflight<'_> {
        Preflight::new(&self.plan, self.host())
    }

    pub fn entry_point(&self) -> PythonEntryPoint {
        PythonEntryPoint::new(&self.interpreter, &self.config.entry, &self.project_root)
    }
}

/// Anchor a configured interpreter path to the project root.
///
/// Bare names stay PATH lookups.
fn configured_executable(project_root: &Path, configured: &str) -> String {
    let path = Path::new(configured);
    if path.is_absolute() || path.components().count() < 2 {
        return configured.to_string();
    }
    project_root.join(path).to_string_lossy().into_owned()
}
