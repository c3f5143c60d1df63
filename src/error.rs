//! Errors at the configuration boundary
//!
//! The collision core itself never fails; only loading table definitions can.

use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Table definition could not be read
    Io(std::io::Error),
    /// Table definition is not valid JSON for the expected schema
    Json(serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "failed to read table definition: {}", e),
            Error::Json(e) => write!(f, "invalid table definition: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
