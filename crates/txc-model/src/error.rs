use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown retry policy type: {0}")]
    UnknownRetryKind(String),

    #[error("unknown write concern level: {0}")]
    UnknownWriteConcern(String),

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("missing required config section: {0}")]
    MissingSection(&'static str),

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
