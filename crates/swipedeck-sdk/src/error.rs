use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    NotFound(String),
    InvalidInput(String),
    Runtime(swipedeck_runtime::Error),
    Internal(anyhow::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::Runtime(err) => write!(f, "Runtime error: {}", err),
            Error::Internal(err) => write!(f, "Internal error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Runtime(err) => Some(err),
            Error::Internal(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<swipedeck_runtime::Error> for Error {
    fn from(err: swipedeck_runtime::Error) -> Self {
        match err {
            swipedeck_runtime::Error::Config(msg) => Error::InvalidInput(msg),
            other => Error::Runtime(other),
        }
    }
}

impl From<swipedeck_providers::Error> for Error {
    fn from(err: swipedeck_providers::Error) -> Self {
        match err {
            swipedeck_providers::Error::NotFound(msg) => Error::NotFound(msg),
            other => Error::Runtime(swipedeck_runtime::Error::Provider(other)),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err)
    }
}
