use std::path::PathBuf;

use thiserror::Error;

const REQUEST_ERR_PREFIX: &str = "while talking to the log server: ";

/// An IO error, along with the path it happened at.
///
/// Use [`IntoIoError::path`] on any `std::io::Result`
/// to get one.
#[derive(Debug, Error)]
#[error("at path {path:?}\n{error}")]
pub struct IoError {
    pub error: std::io::Error,
    pub path: PathBuf,
}

pub trait IntoIoError<T> {
    #[allow(clippy::missing_errors_doc)]
    fn path(self, p: impl Into<PathBuf>) -> Result<T, IoError>;
}

impl<T> IntoIoError<T> for std::io::Result<T> {
    fn path(self, p: impl Into<PathBuf>) -> Result<T, IoError> {
        self.map_err(|error| IoError {
            error,
            path: p.into(),
        })
    }
}

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("couldn't parse json: {error}\n\n{json}")]
    From {
        error: serde_json::Error,
        json: String,
    },
    #[error("couldn't serialize json: {0}")]
    To(serde_json::Error),
}

pub trait IntoJsonError<T> {
    /// Attaches the document that failed to parse.
    #[allow(clippy::missing_errors_doc)]
    fn json(self, doc: String) -> Result<T, JsonError>;
    #[allow(clippy::missing_errors_doc)]
    fn json_to(self) -> Result<T, JsonError>;
}

impl<T> IntoJsonError<T> for serde_json::Result<T> {
    fn json(self, doc: String) -> Result<T, JsonError> {
        self.map_err(|error| JsonError::From { error, json: doc })
    }

    fn json_to(self) -> Result<T, JsonError> {
        self.map_err(JsonError::To)
    }
}

#[derive(Debug, Error)]
pub enum JsonFileError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Json(#[from] JsonError),
}

/// Anything that can go wrong while talking to the backend.
///
/// Only [`RequestError::Status`] means the server actually answered;
/// everything else is a transport-level failure.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("{REQUEST_ERR_PREFIX}{0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("{REQUEST_ERR_PREFIX}connection failed: {0}")]
    Connection(String),
    #[error("{REQUEST_ERR_PREFIX}server returned {code} for {url}")]
    Status {
        code: reqwest::StatusCode,
        url: String,
    },
    #[error("{REQUEST_ERR_PREFIX}expected an event stream from {url}, got {content_type:?}")]
    NotAnEventStream { url: String, content_type: String },
    #[error("invalid server url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}
