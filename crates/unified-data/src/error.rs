use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {name} must be greater than 0")]
    InvalidArgument { name: &'static str },

    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn zero(name: &'static str) -> Self { Self::InvalidArgument { name } }
}

pub type Result<T> = std::result::Result<T, Error>;
