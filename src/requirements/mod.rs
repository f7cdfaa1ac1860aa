//! Requirement detection for the preflight gates.
//!
//! This module provides the checks that run before delegating to the
//! entry point: interpreter version, Python library dependencies and
//! external tools.
//!
//! # Modules
//!
//! - [`host`] - Traits over global host state (imports, installer, PATH, commands)
//! - [`interpreter`] - Interpreter discovery and the version gate
//! - [`dependency`] - Dependency descriptors and the self-installing gate
//! - [`tools`] - External tool requirements and probes
//! - [`probe`] - Executable lookup on the search path

pub mod dependency;
pub mod host;
pub mod interpreter;
pub mod probe;
pub mod tools;

pub use dependency::{
    default_dependencies, ensure_dependencies, missing_dependencies, Dependency, EnsureReport,
};
pub use host::{
    CommandProbe, Host, ModuleOracle, PackageInstaller, PathResolver, SystemCommands,
    VersionSource,
};
pub use interpreter::{
    discover_interpreter, InterpreterVersion, PythonInterpreter, VersionRequirement,
};
pub use probe::SearchPath;
pub use tools::{probe_tool, Detection, ToolRegistry, ToolRequirement, ToolStatus};
