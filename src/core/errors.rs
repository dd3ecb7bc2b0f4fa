use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("AnkiConnect request failed: {0}")]
    Gateway(String),

    #[error("AnkiConnect not running or not installed")]
    GatewayUnavailable,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to load file: {0}")]
    FailedToLoadFile(String),

    #[error("Failed to setup deck: {0}")]
    Bootstrap(Box<SyncError>),

    #[error("Failed to fetch existing notes: {0}")]
    SnapshotFetch(Box<SyncError>),

    #[error("{phase} failed: {source}")]
    Phase { phase: &'static str, source: Box<SyncError> },

    #[error("SyncError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for SyncError {
    fn from(error: std::io::Error) -> Self {
        SyncError::Io(Box::new(error))
    }
}
