use pipeline::PublishError;
use thiserror::Error;

/// Errors that can occur while publishing a job file.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The job path is absolute or escapes the working tree.
    #[error("Invalid job path: {0}")]
    InvalidJobPath(String),

    /// The remote refused the ref update (e.g. non-fast-forward).
    #[error("Push rejected: {refname}: {message}")]
    Rejected { refname: String, message: String },
}

impl From<GitError> for PublishError {
    fn from(err: GitError) -> Self {
        match err {
            GitError::Git(e) => PublishError::Repository {
                message: e.to_string(),
            },
            GitError::Io(e) => PublishError::Io {
                message: e.to_string(),
            },
            GitError::InvalidJobPath(_) => PublishError::Repository {
                message: err.to_string(),
            },
            GitError::Rejected { refname, message } => PublishError::Rejected {
                message: format!("{refname}: {message}"),
            },
        }
    }
}
