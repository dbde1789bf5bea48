use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort the program before or during a session.
///
/// Game endings (collision, win, quit) are not errors; they are reported via
/// [`crate::game::EndReason`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Terminal setup, drawing, or input polling failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot set up logging: {0}")]
    Logger(String),
}
