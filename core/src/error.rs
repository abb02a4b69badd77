use thiserror::Error;

#[derive(Error, Debug)]
pub enum RaffleError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("malformed saved variables: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RaffleResult<T> = Result<T, RaffleError>;
