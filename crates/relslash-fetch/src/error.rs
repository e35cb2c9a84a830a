//! Error types for relslash-fetch.

use thiserror::Error;

/// Every variant names the URL being inspected.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("cannot list members of {url}: {source}")]
    Archive {
        url: String,
        #[source]
        source: relslash_archive::Error,
    },

    #[error("cannot digest {url}: {source}")]
    Digest {
        url: String,
        #[source]
        source: relslash_verify::VerificationError,
    },

    #[error("decoder task for {url} did not finish: {message}")]
    Task { url: String, message: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Network { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Archive { url, .. }
            | FetchError::Digest { url, .. }
            | FetchError::Task { url, .. } => url,
        }
    }

    pub(crate) fn network(url: &str, err: impl std::fmt::Display) -> Self {
        FetchError::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
