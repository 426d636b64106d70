// Clip Vault Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipVaultError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for ClipVaultError {
    fn from(err: anyhow::Error) -> Self {
        ClipVaultError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClipVaultError>;
