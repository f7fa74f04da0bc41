//! App module - shared application state and commands
//!
//! Provides the analysis pipeline and command grammar used by both the
//! one-shot CLI and the interactive shell.

mod commands;
mod state;

pub use commands::*;
pub use state::*;
