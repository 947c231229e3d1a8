use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriviaError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

pub type TriviaResult<T> = Result<T, TriviaError>;
