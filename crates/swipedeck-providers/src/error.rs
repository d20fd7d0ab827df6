use std::fmt;

/// Result type for swipedeck-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported by a candidate source.
///
/// The core treats every variant as transient: pagination swallows them and
/// the vote queue retries.
#[derive(Debug)]
pub enum Error {
    /// Network or transport failure
    Transport(String),

    /// The backend answered with a non-success status
    Rejected { status: u16, message: String },

    /// The referenced candidate does not exist in the source
    NotFound(String),

    /// JSON parsing failed
    Json(serde_json::Error),

    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(msg) => write!(f, "Transport error: {}", msg),
            Error::Rejected { status, message } => {
                write!(f, "Request rejected ({}): {}", status, message)
            }
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Transport(_) | Error::Rejected { .. } | Error::NotFound(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
