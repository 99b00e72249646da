//! Error types for the benchbot dispatch domain.
//!
//! [`BenchBotError`] is the per-delivery error: anything that aborts handling of
//! one webhook delivery after the configuration has been resolved. It wraps the
//! errors reported by the two outbound ports, [`PlatformError`] for the
//! code-hosting platform and [`PublishError`] for the trigger repository.
//!
//! Configuration extraction has its own error type,
//! [`crate::extract::ExtractionError`], which never escapes the domain: it is
//! logged and replaced with default options.
//!
//! None of these errors are retried. A failed delivery is logged by the
//! listener and acknowledged.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Port errors
// ---------------------------------------------------------------------------

/// Failure reported by a [`crate::CodeHost`] implementation.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The request never produced a response (DNS, TLS, connection reset, timeout).
    #[error("Platform request failed: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The platform answered with a non-success HTTP status.
    #[error("Platform returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase, for diagnostics.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("Platform response could not be decoded: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
    },

    /// The request could not be constructed from the given inputs.
    #[error("Invalid platform request: {message}")]
    InvalidRequest {
        /// Which input was rejected and why.
        message: String,
    },
}

/// Failure reported by a [`crate::JobPublisher`] implementation.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Clone, commit, or push failed inside the version-control layer.
    #[error("Repository operation failed: {message}")]
    Repository {
        /// Description of the failing operation.
        message: String,
    },

    /// The remote accepted the connection but refused the ref update.
    #[error("Push rejected: {message}")]
    Rejected {
        /// Rejection reason reported by the remote.
        message: String,
    },

    /// Local file-system work (temporary directory, job file) failed.
    #[error("Working tree I/O failed: {message}")]
    Io {
        /// Description of the I/O failure.
        message: String,
    },

    /// The background task running the publish was cancelled or panicked.
    #[error("Publish task did not complete: {message}")]
    Interrupted {
        /// Join error description.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Delivery-level errors
// ---------------------------------------------------------------------------

/// Errors that abort handling of a single webhook delivery.
#[derive(Debug, Error)]
pub enum BenchBotError {
    /// The platform lookup or the confirmation comment failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// The job file could not be published to the trigger repository.
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// The job descriptor could not be serialized.
    #[error("Job serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
