use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by the release listing and archive fetch operations.
///
/// Every variant is terminal for the call that produced it; nothing is retried.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Request to {url} failed")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status from {url}: {status}")]
    UnexpectedStatus { url: String, status: StatusCode },

    #[error("Failed to parse the release index: {0}")]
    ParseFailure(String),

    #[error("Go version '{0}' is invalid")]
    InvalidVersion(String),

    #[error("Go version '{0}' is not available for download")]
    VersionNotFound(String),

    #[error("'{0}' is not a valid release file name")]
    InvalidReleaseFile(String),

    #[error("Failed to create HTTP client")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ReleaseError> = std::result::Result<T, E>;
