//! Full-screen TUI for taskdeck.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;
use taskdeck_core::api::ApiClient;

/// Runs the interactive UI until the user quits.
///
/// # Errors
/// Returns an error if stderr is not a terminal or terminal I/O fails.
pub fn run_interactive(api: ApiClient) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `taskdeck list` and friends for scripted access."
        );
    }

    let mut runtime = TuiRuntime::new(api)?;
    runtime.run()
}
