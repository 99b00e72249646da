//! benchbot trigger-repository adapter.
//!
//! Implements [`pipeline::JobPublisher`] with `git2`. Publishing a job means:
//! clone the trigger branch into a fresh temporary directory, write the job
//! file, commit it (even when nothing changed), and push. The benchmarking
//! pipeline's CI picks the commit up from there.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** `git2` is blocking, so [`GitJobPublisher`] runs each
//! publish on Tokio's blocking pool. Nothing is retried.

mod error;
mod publisher;

pub use error::GitError;
pub use publisher::{publish_blocking, GitJobPublisher, PublisherSettings};
