use thiserror::Error;

use crate::input::InputError;

/// Errors surfaced by the analysis pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected before disassembly
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON rendering failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type used across the crate
pub type Result<T> = std::result::Result<T, Error>;
