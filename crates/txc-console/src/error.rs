use thiserror::Error;
use txc_client::ClientError;
use txc_model::ModelError;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("no settings form is open")]
    NoForm,

    #[error("no dead-letter queue is selected")]
    NoDlqSelected,

    #[error("the name of an existing executor cannot be changed")]
    NameLocked,

    #[error("unknown status filter: {0} (expected: all|enabled|disabled)")]
    InvalidFilter(String),

    #[error("unknown container: {0}")]
    UnknownContainer(String),

    #[error("{0}")]
    Component(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("encode error: {0}")]
    Encode(String),
}

impl From<std::io::Error> for ConsoleError {
    fn from(e: std::io::Error) -> Self {
        ConsoleError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(e: serde_json::Error) -> Self {
        ConsoleError::Encode(e.to_string())
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
