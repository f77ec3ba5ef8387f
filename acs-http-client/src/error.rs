//! Error types for the ACS HTTP client

use crate::model::Step;
use thiserror::Error;

/// Errors that can occur when posting to an ACS board
#[derive(Error, Debug)]
pub enum AcsError {
    /// HTTP request failed before a response was received
    #[error("{step} request failed: {source}")]
    Request {
        /// Workflow step that issued the request
        step: Step,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with something other than 200 OK
    #[error("{step} returned HTTP status {status}")]
    InvalidStatus {
        /// Workflow step that issued the request
        step: Step,
        /// The status code that was received
        status: reqwest::StatusCode,
    },

    /// A form parameter contains characters the server encoding cannot represent
    #[error("Parameter `{field}` cannot be encoded as {encoding}")]
    Encoding {
        /// Name of the server encoding
        encoding: &'static str,
        /// Name of the offending parameter, or `<value>` for a standalone component
        field: String,
    },

    /// Percent-decoded bytes are not valid in the server encoding
    #[error("Failed to decode form value as {0}")]
    Decoding(&'static str),

    /// Encoding label not recognised
    #[error("Unknown character encoding: {0}")]
    UnknownEncoding(String),

    /// Encoding is known but cannot be used to encode form data
    #[error("Character encoding {0} cannot be used for form data")]
    UnsupportedEncoding(&'static str),

    /// Base URL could not be parsed
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[source] reqwest::Error),

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}

impl AcsError {
    /// Workflow step the error occurred in, if it came from a request
    pub fn step(&self) -> Option<Step> {
        match self {
            AcsError::Request { step, .. } | AcsError::InvalidStatus { step, .. } => Some(*step),
            _ => None,
        }
    }
}
