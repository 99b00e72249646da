//! Exercises the client against a mock GitHub REST API.

use github::GithubClient;
use httpmock::prelude::*;
use pipeline::{CodeHost, IssueNumber, PlatformError, RepositoryName};
use serde_json::json;

fn repo() -> RepositoryName {
    RepositoryName::new("electronic-structure/sirius").unwrap()
}

#[tokio::test]
async fn pull_request_lookup_reads_head_and_base() {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/electronic-structure/sirius/pulls/9")
                .header("authorization", "Bearer s3cret")
                .header("accept", "application/vnd.github+json")
                .header("x-github-api-version", "2022-11-28");
            then.status(200).json_body(json!({
                "number": 9,
                "title": "Faster FFT",
                "body": null,
                "head": { "sha": "1111", "ref": "fft", "repo": { "full_name": "fork/sirius" } },
                "base": { "sha": "2222", "ref": "develop", "repo": { "full_name": "electronic-structure/sirius" } }
            }));
        })
        .await;

    let client = GithubClient::new("s3cret", &server.base_url()).unwrap();
    let pr = client.pull_request(&repo(), IssueNumber::new(9)).await.unwrap();

    lookup.assert_calls_async(1).await;
    assert_eq!(pr.number, IssueNumber::new(9));
    assert_eq!(pr.head.sha.as_str(), "1111");
    assert_eq!(pr.head.repo.unwrap().full_name.as_str(), "fork/sirius");
    assert_eq!(pr.base.sha.as_str(), "2222");
}

#[tokio::test]
async fn comment_is_posted_as_json() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/repos/electronic-structure/sirius/issues/9/comments")
                .header("authorization", "Bearer s3cret")
                .json_body(json!({ "body": "Benchmark job submitted." }));
            then.status(201).json_body(json!({ "id": 1 }));
        })
        .await;

    let client = GithubClient::new("s3cret", &server.base_url()).unwrap();
    client
        .post_comment(&repo(), IssueNumber::new(9), "Benchmark job submitted.")
        .await
        .unwrap();

    create.assert_calls_async(1).await;
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/electronic-structure/sirius/pulls/404");
            then.status(404).json_body(json!({ "message": "Not Found" }));
        })
        .await;

    let client = GithubClient::new("s3cret", &server.base_url()).unwrap();
    let err = client
        .pull_request(&repo(), IssueNumber::new(404))
        .await
        .unwrap_err();

    lookup.assert_calls_async(1).await;
    match err {
        PlatformError::Status { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("Not Found"));
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_body_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/electronic-structure/sirius/pulls/9");
            then.status(200).json_body(json!({ "number": "nine" }));
        })
        .await;

    let client = GithubClient::new("s3cret", &server.base_url()).unwrap();
    let err = client
        .pull_request(&repo(), IssueNumber::new(9))
        .await
        .unwrap_err();

    assert!(matches!(err, PlatformError::Decode { .. }));
}
