use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("File is too large. Maximum size is 5 GB.")]
    TooLarge { size: u64, max: u64 },

    #[error("Could not read {name}: {reason}")]
    Unreadable { name: String, reason: String },

    #[error("An upload is already in progress")]
    Busy,
}

impl IntakeError {
    pub fn unreadable(path: &Path, source: std::io::Error) -> Self {
        IntakeError::Unreadable {
            name: path.display().to_string(),
            reason: source.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please select a video file.")]
    MissingFile,

    #[error("An upload is already in progress")]
    InFlight,
}

/// Failures while preparing the request, before anything reaches the server.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file type {mime}: {source}")]
    InvalidMime {
        mime: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not start the upload runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("hand-off store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("hand-off store serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("hand-off store lock poisoned")]
    Poisoned,
}
