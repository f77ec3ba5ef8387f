//! Error types for the CLI

use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Posting to the portal failed
    #[error("Post failed: {0}")]
    Http(#[from] acs_http_client::AcsError),

    /// Body file could not be read
    #[error("Failed to read body from {path}: {source}")]
    BodyRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
