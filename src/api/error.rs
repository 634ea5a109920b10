//! Gateway error type
//!
//! Failures are not classified beyond what the transport tells us: an
//! expired token is just another non-success status.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Cannot read attachment {path}: {source}")]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Local storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
