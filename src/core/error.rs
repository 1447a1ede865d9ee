use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkloopError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid word: {0}")]
    InvalidWord(#[from] crate::engine::word::WordError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SkloopError>;
