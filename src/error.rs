//! Error enum
use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Caller-supplied argument is out of its domain
    /// (exclusive selectors, non-positive ids, metadata arity...).
    InvalidArgument(String),
    /// Loaded or supplied data does not honor the corpus contract
    /// (mismatched key sets, file of the wrong shape).
    Contract(String),
    /// Requested text rendering format is unknown.
    UnsupportedFormat(String),
    Io(std::io::Error),
    /// Malformed JSON.
    Serde(serde_json::Error),
    Csv(csv::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Error::Contract(msg) => write!(f, "corpus contract violation: {}", msg),
            Error::UnsupportedFormat(format) => write!(
                f,
                "unsupported format {:?}, should be one of [\"sentences\", \"words\", \"text\"]",
                format
            ),
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Serde(e) => write!(f, "json error: {}", e),
            Error::Csv(e) => write!(f, "tsv error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Serde(e) => Some(e),
            Error::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}
