use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of the object-store write or of preparing its payload.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("object store is not configured: {0} is missing")]
    MissingConfig(&'static str),
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("object store rejected the upload: {message}")]
    Provider {
        message: String,
        #[source]
        source: BoxError,
    },
}

/// Failure reported by the hosted assistant or while reading its stream.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("assistant API key is not configured")]
    MissingApiKey,
    #[error("assistant request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("assistant returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed assistant stream: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("assistant returned an empty reply")]
    EmptyReply,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}
