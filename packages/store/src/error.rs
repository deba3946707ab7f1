use thiserror::Error;

/// Failure writing to or clearing a session store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session could not be serialized: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}
