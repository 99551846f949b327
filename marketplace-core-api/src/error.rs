use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Referenced entity not found: {0}")]
    ReferenceNotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Verification code does not match")]
    CodeMismatch,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
