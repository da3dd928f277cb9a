//! Error types for progdl-fetch.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use progdl_verify::VerificationError;
use thiserror::Error;

/// Boxed error raised by an [`HttpClient`](crate::HttpClient) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("checksum failed for {path}")]
    Checksum {
        path:   PathBuf,
        #[source]
        source: VerificationError,
    },

    #[error("request failed: {0}")]
    Network(#[source] BoxError),

    #[error("response stream failed: {0}")]
    Stream(#[source] BoxError),

    #[error("file I/O failed for '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },
}

impl Error {
    pub(crate) fn network<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
        Self::Network(Box::new(e))
    }

    pub(crate) fn stream<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
        Self::Stream(Box::new(e))
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Failures of the reqwest-backed transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request setup timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection pool is closed")]
    Closed,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
