//! CLI command implementations.
//!
//! Every catalog action writes its outcome to a caller-supplied writer so
//! the one-shot subcommands and the interactive menu share one code path.

pub mod books;
pub mod checkouts;
pub mod inspect;
pub mod menu;
pub mod users;

use libris_core::CoreError;
use std::io;
use thiserror::Error;

/// Result type for CLI actions.
pub type CliResult<T> = Result<T, CliError>;

/// Errors raised by CLI actions.
#[derive(Debug, Error)]
pub enum CliError {
    /// The catalog rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Writing to the terminal failed.
    #[error("output error: {0}")]
    Io(#[from] io::Error),

    /// Output could not be encoded as JSON.
    #[error("output error: {0}")]
    Json(#[from] serde_json::Error),
}
