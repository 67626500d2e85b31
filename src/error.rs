use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown content domain: \"{0}\"")]
    UnknownDomain(String),

    #[error("Invalid taxonomy level {level}: must be between 1 and {max}")]
    InvalidLevel { level: usize, max: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Crypto error: {0}")]
    Crypto(#[from] campus_crypto::CryptoError),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
