//! Port traits implemented by the infrastructure crates.
//!
//! | Trait | Implemented by |
//! |-------|----------------|
//! | [`CodeHost`] | `github::GithubClient` |
//! | [`JobPublisher`] | `vcs::GitJobPublisher` |
//! | [`DeliveryHandler`] | [`crate::BenchmarkDispatcher`], consumed by `listener` |
//!
//! Implementations hold only immutable state (credentials, URLs) and are shared
//! across concurrent deliveries behind an `Arc`.

use async_trait::async_trait;

use crate::{
    BenchBotError, DeliveryOutcome, IssueNumber, PlatformError, PublishError, PullRequest,
    RepositoryName, WebhookEvent,
};

/// The code-hosting platform, as seen by the dispatcher.
#[async_trait]
pub trait CodeHost: Send + Sync {
    /// Fetches a pull request so its head and base endpoints can be read.
    async fn pull_request(
        &self,
        repository: &RepositoryName,
        number: IssueNumber,
    ) -> Result<PullRequest, PlatformError>;

    /// Posts a comment on an issue or pull request.
    async fn post_comment(
        &self,
        repository: &RepositoryName,
        number: IssueNumber,
        body: &str,
    ) -> Result<(), PlatformError>;
}

/// Publishes a serialized job to the benchmarking pipeline's trigger repository.
#[async_trait]
pub trait JobPublisher: Send + Sync {
    /// Commits `job` with `message` and pushes it. A commit is created even if
    /// the content is unchanged since the previous job.
    async fn publish(&self, job: &str, message: &str) -> Result<(), PublishError>;
}

/// Handles one decoded webhook delivery.
#[async_trait]
pub trait DeliveryHandler: Send + Sync {
    async fn handle(&self, event: WebhookEvent) -> Result<DeliveryOutcome, BenchBotError>;
}
