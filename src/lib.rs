//! bstrap - Preflight checks and bootstrap for a Python dev CLI.
//!
//! bstrap makes sure a workstation can run the project's dev CLI before
//! handing control to it: the interpreter is new enough, the CLI's Python
//! dependencies are importable (installing any that are missing), and the
//! external tools it shells out to are present.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`requirements`] - Interpreter, dependency and tool checks
//! - [`runner`] - The gate chain and delegation to the entry point
//! - [`shell`] - Subprocess execution
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use bstrap::requirements::{InterpreterVersion, VersionRequirement};
//!
//! let required = VersionRequirement::default();
//! let found = InterpreterVersion::parse("Python 3.11.4").unwrap();
//! assert!(required.accepts(&found));
//! assert!(required.check(&InterpreterVersion::new(3, 8, 10)).is_err());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{BstrapError, Result};
