//! Preflight orchestration and delegation.
//!
//! - [`gates`] - The gate chain and the non-stopping report used by `check`
//! - [`delegate`] - The entry point invoked once every gate passes

pub mod delegate;
pub mod gates;

pub use delegate::{EntryPoint, PythonEntryPoint};
pub use gates::{Gate, GateCheck, Preflight, PreflightOutcome, PreflightPlan, PreflightReport};

use crate::error::Result;
use crate::ui::UserInterface;

/// Exit status when a tool gate fails.
pub const MISSING_TOOL_EXIT: i32 = 1;

/// Run the gates, then hand over to `entry` exactly once if they all pass.
///
/// Returns the process exit status: the entry point's own status after
/// delegation, or [`MISSING_TOOL_EXIT`] when a tool is missing.
pub fn bootstrap(
    preflight: &Preflight<'_>,
    entry: &dyn EntryPoint,
    args: &[String],
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    match preflight.run(ui)? {
        PreflightOutcome::Ready => entry.invoke(args),
        PreflightOutcome::Aborted { gate } => {
            tracing::debug!("Preflight aborted at {}", gate);
            Ok(MISSING_TOOL_EXIT)
        }
    }
}
