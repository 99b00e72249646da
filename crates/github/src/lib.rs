//! benchbot GitHub infrastructure adapter.
//!
//! Implements [`pipeline::CodeHost`] over the GitHub REST API with `reqwest`:
//!
//! - `GET /repos/{owner}/{repo}/pulls/{number}` resolves the head and base of a
//!   pull request when the trigger arrived as an issue comment.
//! - `POST /repos/{owner}/{repo}/issues/{number}/comments` posts the
//!   confirmation.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. HTTP details
//! (authentication headers, API versioning, status handling) live here; the
//! [`pipeline`] crate never sees them. Nothing is retried.

mod client;
mod error;

pub use client::{GithubClient, DEFAULT_API_URL};
pub use error::GithubError;
