//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Both commands share
//! [`PreflightSetup`] for config loading and interpreter discovery.

pub mod check;
pub mod dispatcher;
pub mod run;
pub mod setup;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use setup::PreflightSetup;
