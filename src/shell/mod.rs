//! Subprocess execution.

pub mod command;

pub use command::{
    display_command, execute, execute_captured, execute_check, CommandOptions, CommandResult,
    StdioMode,
};
