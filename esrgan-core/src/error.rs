use thiserror::Error;

#[derive(Error, Debug)]
pub enum EsrganError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid options: {0}")]
    Validation(String),

    #[error("invalid set range: {0}")]
    InvalidRange(String),

    #[error("upscaler failed: {0}")]
    Runner(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, EsrganError>;
