//! Inbound webhook events.
//!
//! Only the fields benchbot reads are modelled; everything else in the GitHub
//! payload is ignored during deserialization. [`WebhookEvent`] unifies the two
//! supported event kinds into one tagged union and carries every other kind as
//! [`WebhookEvent::Unsupported`].

use serde::Deserialize;

use crate::{CommitSha, IssueNumber, RepositoryName};

// ---------------------------------------------------------------------------
// Payload fragments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub full_name: RepositoryName,
}

/// The account that caused the delivery.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub login: String,
    /// `"User"`, `"Bot"` or `"Organization"`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl Account {
    pub fn is_bot(&self) -> bool {
        self.kind.as_deref() == Some("Bot")
    }
}

/// One end of a pull request (`head` or `base`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestRef {
    pub sha: CommitSha,
    /// `null` when the repository no longer exists, e.g. a deleted fork.
    #[serde(default)]
    pub repo: Option<Repository>,
}

/// A pull request as it appears in `pull_request` events and in the REST API
/// response for `GET /repos/{owner}/{repo}/pulls/{number}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub number: IssueNumber,
    #[serde(default)]
    pub body: Option<String>,
    pub head: PullRequestRef,
    pub base: PullRequestRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub number: IssueNumber,
    /// Present only when the issue is a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub body: Option<String>,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Payload of a `pull_request` delivery.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub pull_request: PullRequest,
    pub repository: Repository,
    #[serde(default)]
    pub sender: Option<Account>,
}

/// Payload of an `issue_comment` delivery.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueCommentEvent {
    pub action: String,
    pub issue: Issue,
    pub comment: Comment,
    pub repository: Repository,
    #[serde(default)]
    pub sender: Option<Account>,
}

/// A decoded webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    PullRequest(PullRequestEvent),
    IssueComment(IssueCommentEvent),
    /// Any other event kind (`ping`, `push`, ...). Acknowledged and ignored.
    Unsupported { kind: String },
}

impl WebhookEvent {
    /// Decodes a delivery body according to its `X-GitHub-Event` kind.
    ///
    /// Unsupported kinds are not decoded at all, so their bodies can never
    /// cause an error.
    pub fn from_payload(kind: &str, body: &[u8]) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            "pull_request" => Self::PullRequest(serde_json::from_slice(body)?),
            "issue_comment" => Self::IssueComment(serde_json::from_slice(body)?),
            other => Self::Unsupported {
                kind: other.to_owned(),
            },
        })
    }

    /// The `X-GitHub-Event` kind this event was decoded from.
    pub fn kind(&self) -> &str {
        match self {
            Self::PullRequest(_) => "pull_request",
            Self::IssueComment(_) => "issue_comment",
            Self::Unsupported { kind } => kind,
        }
    }

    /// Returns the text to scan for the trigger phrase, or `None` when the
    /// event should not be acted on at all.
    ///
    /// Pull requests are scanned when opened, reopened or edited; comments when
    /// created or edited, and only on pull requests. Deliveries caused by bot
    /// accounts are never acted on.
    pub fn trigger_text(&self) -> Option<&str> {
        match self {
            Self::PullRequest(event) => {
                if is_bot(event.sender.as_ref())
                    || !matches!(event.action.as_str(), "opened" | "edited" | "reopened")
                {
                    return None;
                }
                event.pull_request.body.as_deref()
            }
            Self::IssueComment(event) => {
                if is_bot(event.sender.as_ref())
                    || event.issue.pull_request.is_none()
                    || !matches!(event.action.as_str(), "created" | "edited")
                {
                    return None;
                }
                event.comment.body.as_deref()
            }
            Self::Unsupported { .. } => None,
        }
    }
}

fn is_bot(sender: Option<&Account>) -> bool {
    sender.is_some_and(Account::is_bot)
}
