//! Event adapter: resolves which commits a delivery asks to compare.

use crate::{
    CodeHost, CommitSha, IssueNumber, PlatformError, PullRequest, PullRequestRef, RepositoryName,
    WebhookEvent,
};

/// One side of a comparison: a commit in a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEndpoints {
    pub repository: RepositoryName,
    pub sha: CommitSha,
}

impl EventEndpoints {
    /// Returns `None` when the ref's repository is gone.
    fn from_ref(r: &PullRequestRef) -> Option<Self> {
        Some(Self {
            repository: r.repo.as_ref()?.full_name.clone(),
            sha: r.sha.clone(),
        })
    }
}

/// Everything the job assembler needs to know about the triggering event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTarget {
    /// The pull request's head.
    pub current: EventEndpoints,
    /// The pull request's base.
    pub reference: EventEndpoints,
    /// Pull request number; the confirmation is posted there.
    pub discussion: IssueNumber,
    /// Repository the delivery was sent for.
    pub origin: RepositoryName,
}

impl ComparisonTarget {
    fn from_pull_request(pull_request: &PullRequest, origin: &RepositoryName) -> Option<Self> {
        Some(Self {
            current: EventEndpoints::from_ref(&pull_request.head)?,
            reference: EventEndpoints::from_ref(&pull_request.base)?,
            discussion: pull_request.number,
            origin: origin.clone(),
        })
    }
}

/// Result of adapting an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adapted {
    Target(ComparisonTarget),
    /// The event kind carries no pull request; acknowledge and stop.
    Unsupported,
    /// The pull request's head or base repository no longer exists.
    MissingRepository,
}

fn adapt(pull_request: &PullRequest, origin: &RepositoryName) -> Adapted {
    match ComparisonTarget::from_pull_request(pull_request, origin) {
        Some(target) => Adapted::Target(target),
        None => {
            tracing::warn!(
                repository = %origin,
                number = %pull_request.number,
                "Pull request head or base repository is missing"
            );
            Adapted::MissingRepository
        }
    }
}

/// Resolves the comparison endpoints of `event`.
///
/// `pull_request` events carry both endpoints inline. `issue_comment` events
/// only carry the number, so exactly one lookup is made against `host`.
pub async fn resolve_target(
    event: &WebhookEvent,
    host: &dyn CodeHost,
) -> Result<Adapted, PlatformError> {
    match event {
        WebhookEvent::PullRequest(event) => {
            Ok(adapt(&event.pull_request, &event.repository.full_name))
        }
        WebhookEvent::IssueComment(event) => {
            let origin = &event.repository.full_name;
            tracing::debug!(repository = %origin, number = %event.issue.number, "Looking up pull request");
            let pull_request = host.pull_request(origin, event.issue.number).await?;
            Ok(adapt(&pull_request, origin))
        }
        WebhookEvent::Unsupported { .. } => Ok(Adapted::Unsupported),
    }
}
