//! REST client implementing [`pipeline::CodeHost`].

use async_trait::async_trait;
use pipeline::{CodeHost, IssueNumber, PlatformError, PullRequest, RepositoryName};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Serialize;

use crate::GithubError;

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("benchbot/", env!("CARGO_PKG_VERSION"));

/// GitHub REST client authenticated with a single token.
///
/// The token is baked into the default headers at construction and never
/// changes afterwards, so one client can be shared by all deliveries.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
}

#[derive(Serialize)]
struct NewComment<'a> {
    body: &'a str,
}

impl GithubClient {
    /// Creates a client for `api_url` (e.g. [`DEFAULT_API_URL`] or a GitHub
    /// Enterprise `https://host/api/v3`).
    pub fn new(token: &str, api_url: &str) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| GithubError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, repository: &RepositoryName, path: &str) -> Result<String, GithubError> {
        let (owner, repo) = repository
            .split()
            .ok_or_else(|| GithubError::InvalidRepository(repository.to_string()))?;
        Ok(format!("{}/repos/{owner}/{repo}/{path}", self.api_url))
    }

    async fn fetch_pull_request(
        &self,
        repository: &RepositoryName,
        number: IssueNumber,
    ) -> Result<PullRequest, GithubError> {
        let url = self.repo_url(repository, &format!("pulls/{number}"))?;
        let response = check_status(self.http.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn create_comment(
        &self,
        repository: &RepositoryName,
        number: IssueNumber,
        body: &str,
    ) -> Result<(), GithubError> {
        let url = self.repo_url(repository, &format!("issues/{number}/comments"))?;
        let request = self.http.post(&url).json(&NewComment { body });
        check_status(request.send().await?).await?;
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GithubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GithubError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl CodeHost for GithubClient {
    async fn pull_request(
        &self,
        repository: &RepositoryName,
        number: IssueNumber,
    ) -> Result<PullRequest, PlatformError> {
        tracing::debug!(repository = %repository, number = %number, "Fetching pull request");
        Ok(self.fetch_pull_request(repository, number).await?)
    }

    async fn post_comment(
        &self,
        repository: &RepositoryName,
        number: IssueNumber,
        body: &str,
    ) -> Result<(), PlatformError> {
        tracing::debug!(repository = %repository, number = %number, "Posting comment");
        Ok(self.create_comment(repository, number, body).await?)
    }
}
