//! Errors raised by the GitHub adapter.

use pipeline::PlatformError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GithubError {
    /// The token contains characters that cannot appear in an HTTP header.
    #[error("GitHub token is not a valid header value")]
    InvalidToken,

    /// The repository name is not of the form `owner/repo`.
    #[error("Invalid repository name: {0}")]
    InvalidRepository(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with a non-success status.
    #[error("GitHub returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl From<GithubError> for PlatformError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::InvalidToken | GithubError::InvalidRepository(_) => {
                PlatformError::InvalidRequest {
                    message: err.to_string(),
                }
            }
            GithubError::Http(e) if e.is_decode() => PlatformError::Decode {
                message: e.to_string(),
            },
            GithubError::Http(e) => PlatformError::Transport {
                message: e.to_string(),
            },
            GithubError::Status { status, body } => PlatformError::Status {
                status,
                message: body,
            },
        }
    }
}
