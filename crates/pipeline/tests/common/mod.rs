//! In-memory fakes of the port traits.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use pipeline::{
    CodeHost, CommitSha, IssueNumber, JobPublisher, PlatformError, PublishError, PullRequest,
    PullRequestRef, Repository, RepositoryName, WebhookEvent,
};
use serde_json::json;

pub fn repo(name: &str) -> RepositoryName {
    RepositoryName::new(name).unwrap()
}

pub fn pull_request(number: u64, head_sha: &str, base_sha: &str) -> PullRequest {
    PullRequest {
        number: IssueNumber::new(number),
        body: None,
        head: PullRequestRef {
            sha: CommitSha::new(head_sha).unwrap(),
            repo: Some(Repository {
                full_name: repo("fork/sirius"),
            }),
        },
        base: PullRequestRef {
            sha: CommitSha::new(base_sha).unwrap(),
            repo: Some(Repository {
                full_name: repo("electronic-structure/sirius"),
            }),
        },
    }
}

pub fn pull_request_event(action: &str, body: &str) -> WebhookEvent {
    let payload = json!({
        "action": action,
        "number": 5,
        "pull_request": {
            "number": 5,
            "body": body,
            "head": { "sha": "head5", "repo": { "full_name": "fork/sirius" } },
            "base": { "sha": "base5", "repo": { "full_name": "electronic-structure/sirius" } }
        },
        "repository": { "full_name": "electronic-structure/sirius" },
        "sender": { "login": "alice", "type": "User" }
    });
    WebhookEvent::from_payload("pull_request", payload.to_string().as_bytes()).unwrap()
}

pub fn issue_comment_event(number: u64, body: &str) -> WebhookEvent {
    let payload = json!({
        "action": "created",
        "issue": {
            "number": number,
            "pull_request": { "url": format!("https://api.github.com/repos/electronic-structure/sirius/pulls/{number}") }
        },
        "comment": { "body": body },
        "repository": { "full_name": "electronic-structure/sirius" },
        "sender": { "login": "bob", "type": "User" }
    });
    WebhookEvent::from_payload("issue_comment", payload.to_string().as_bytes()).unwrap()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedComment {
    pub repository: RepositoryName,
    pub number: IssueNumber,
    pub body: String,
}

/// Serves a fixed pull request and records every call.
#[derive(Default)]
pub struct FakeHost {
    pub pull_request: Option<PullRequest>,
    pub fail_comments: bool,
    pub lookups: Mutex<Vec<(RepositoryName, IssueNumber)>>,
    pub comments: Mutex<Vec<PostedComment>>,
}

impl FakeHost {
    pub fn serving(pull_request: PullRequest) -> Self {
        Self {
            pull_request: Some(pull_request),
            ..Self::default()
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }

    pub fn comments(&self) -> Vec<PostedComment> {
        self.comments.lock().unwrap().clone()
    }
}

#[async_trait]
impl CodeHost for FakeHost {
    async fn pull_request(
        &self,
        repository: &RepositoryName,
        number: IssueNumber,
    ) -> Result<PullRequest, PlatformError> {
        self.lookups
            .lock()
            .unwrap()
            .push((repository.clone(), number));
        self.pull_request.clone().ok_or(PlatformError::Status {
            status: 404,
            message: "Not Found".to_string(),
        })
    }

    async fn post_comment(
        &self,
        repository: &RepositoryName,
        number: IssueNumber,
        body: &str,
    ) -> Result<(), PlatformError> {
        if self.fail_comments {
            return Err(PlatformError::Transport {
                message: "connection reset".to_string(),
            });
        }
        self.comments.lock().unwrap().push(PostedComment {
            repository: repository.clone(),
            number,
            body: body.to_string(),
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedJob {
    pub contents: String,
    pub message: String,
}

#[derive(Default)]
pub struct FakePublisher {
    pub fail: bool,
    pub published: Mutex<Vec<PublishedJob>>,
}

impl FakePublisher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<PublishedJob> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobPublisher for FakePublisher {
    async fn publish(&self, job: &str, message: &str) -> Result<(), PublishError> {
        if self.fail {
            return Err(PublishError::Rejected {
                message: "refs/heads/main: non-fast-forward".to_string(),
            });
        }
        self.published.lock().unwrap().push(PublishedJob {
            contents: job.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}
