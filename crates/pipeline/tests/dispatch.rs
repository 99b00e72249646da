mod common;

use std::sync::Arc;

use common::{issue_comment_event, pull_request, pull_request_event, repo, FakeHost, FakePublisher};
use pipeline::{
    BenchBotError, BenchmarkDispatcher, DeliveryHandler, DeliveryOutcome, IgnoreReason,
    IssueNumber, MarkdownYamlParser, TriggerMatcher, WebhookEvent, CONFIRMATION_PREAMBLE,
    DEFAULT_SPEC,
};

fn dispatcher(host: &Arc<FakeHost>, publisher: &Arc<FakePublisher>) -> BenchmarkDispatcher {
    BenchmarkDispatcher::new(
        TriggerMatcher::for_phrase("@benchbot run").unwrap(),
        Arc::new(MarkdownYamlParser),
        host.clone(),
        publisher.clone(),
    )
}

fn dispatched(outcome: DeliveryOutcome) -> pipeline::BenchmarkJob {
    match outcome {
        DeliveryOutcome::Dispatched(job) => job,
        other => panic!("expected a dispatched job, got {other:?}"),
    }
}

#[tokio::test]
async fn trigger_without_block_dispatches_defaults() {
    let host = Arc::new(FakeHost::default());
    let publisher = Arc::new(FakePublisher::default());

    let job = dispatched(
        dispatcher(&host, &publisher)
            .handle(pull_request_event("opened", "Speeds up the solver.\n\n@benchbot run"))
            .await
            .unwrap(),
    );

    assert_eq!(job.reference.spec, DEFAULT_SPEC);
    assert_eq!(job.current.spec, DEFAULT_SPEC);
    assert!(job.reference.args.is_empty());
    assert!(job.current.args.is_empty());
    assert_eq!(host.lookup_count(), 0);
}

#[tokio::test]
async fn published_job_and_confirmation_echo_the_same_text() {
    let host = Arc::new(FakeHost::default());
    let publisher = Arc::new(FakePublisher::default());
    let body = "@benchbot run\n\n```yaml\nspec: new@v2\nargs: [\"-n\", \"4\"]\nreference:\n  spec: old@v1\n```\n";

    let job = dispatched(
        dispatcher(&host, &publisher)
            .handle(pull_request_event("opened", body))
            .await
            .unwrap(),
    );
    assert_eq!(job.reference.spec, "old@v1");
    assert_eq!(job.current.spec, "new@v2");
    assert_eq!(job.reference.args, vec!["-n", "4"]);
    assert_eq!(job.current.args, vec!["-n", "4"]);

    let published = publisher.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].message, "Benchmark head5 vs base5");
    assert_eq!(published[0].contents, job.to_pretty_json().unwrap());

    let comments = host.comments();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].repository, repo("electronic-structure/sirius"));
    assert_eq!(comments[0].number, IssueNumber::new(5));
    assert!(comments[0].body.starts_with(CONFIRMATION_PREAMBLE));
    assert!(comments[0]
        .body
        .contains(&format!("```json\n{}\n```", published[0].contents)));
}

#[tokio::test]
async fn issue_comment_dispatch_uses_the_looked_up_pull_request() {
    let host = Arc::new(FakeHost::serving(pull_request(44, "c0ffee", "decade")));
    let publisher = Arc::new(FakePublisher::default());

    let job = dispatched(
        dispatcher(&host, &publisher)
            .handle(issue_comment_event(44, "@benchbot run"))
            .await
            .unwrap(),
    );

    assert_eq!(host.lookup_count(), 1);
    assert_eq!(job.current.sha.as_str(), "c0ffee");
    assert_eq!(job.reference.sha.as_str(), "decade");
    assert_eq!(job.report_to.issue, IssueNumber::new(44));
}

#[tokio::test]
async fn malformed_block_still_dispatches_with_defaults() {
    let host = Arc::new(FakeHost::default());
    let publisher = Arc::new(FakePublisher::default());

    let job = dispatched(
        dispatcher(&host, &publisher)
            .handle(pull_request_event(
                "edited",
                "@benchbot run\n```\nspec: [broken\n```\n",
            ))
            .await
            .unwrap(),
    );
    assert_eq!(job.current.spec, DEFAULT_SPEC);
    assert_eq!(publisher.published().len(), 1);
}

#[tokio::test]
async fn text_without_trigger_is_ignored() {
    let host = Arc::new(FakeHost::serving(pull_request(44, "a", "b")));
    let publisher = Arc::new(FakePublisher::default());

    let outcome = dispatcher(&host, &publisher)
        .handle(issue_comment_event(44, "nice work"))
        .await
        .unwrap();

    assert_eq!(outcome, DeliveryOutcome::Ignored(IgnoreReason::NoTrigger));
    assert_eq!(host.lookup_count(), 0);
    assert!(publisher.published().is_empty());
    assert!(host.comments().is_empty());
}

#[tokio::test]
async fn unsupported_kinds_make_no_downstream_calls() {
    let host = Arc::new(FakeHost::default());
    let publisher = Arc::new(FakePublisher::default());

    let outcome = dispatcher(&host, &publisher)
        .handle(WebhookEvent::Unsupported {
            kind: "ping".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(outcome, DeliveryOutcome::Ignored(IgnoreReason::NotActionable));
    assert_eq!(host.lookup_count(), 0);
    assert!(publisher.published().is_empty());
    assert!(host.comments().is_empty());
}

#[tokio::test]
async fn closed_pull_requests_are_not_actionable() {
    let host = Arc::new(FakeHost::default());
    let publisher = Arc::new(FakePublisher::default());

    let outcome = dispatcher(&host, &publisher)
        .handle(pull_request_event("closed", "@benchbot run"))
        .await
        .unwrap();

    assert_eq!(outcome, DeliveryOutcome::Ignored(IgnoreReason::NotActionable));
    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn publish_failure_skips_the_confirmation() {
    let host = Arc::new(FakeHost::default());
    let publisher = Arc::new(FakePublisher::failing());

    let err = dispatcher(&host, &publisher)
        .handle(pull_request_event("opened", "@benchbot run"))
        .await
        .unwrap_err();

    assert!(matches!(err, BenchBotError::Publish(_)));
    assert!(host.comments().is_empty());
}

#[tokio::test]
async fn comment_failure_after_publish_is_reported_but_not_rolled_back() {
    let host = Arc::new(FakeHost {
        fail_comments: true,
        ..FakeHost::default()
    });
    let publisher = Arc::new(FakePublisher::default());

    let err = dispatcher(&host, &publisher)
        .handle(pull_request_event("opened", "@benchbot run"))
        .await
        .unwrap_err();

    assert!(matches!(err, BenchBotError::Platform(_)));
    assert_eq!(publisher.published().len(), 1);
}

#[tokio::test]
async fn deleted_fork_is_not_actionable() {
    let mut gone = pull_request(44, "cafe", "f00d");
    gone.head.repo = None;
    let host = Arc::new(FakeHost::serving(gone));
    let publisher = Arc::new(FakePublisher::default());

    let outcome = dispatcher(&host, &publisher)
        .handle(issue_comment_event(44, "@benchbot run"))
        .await
        .unwrap();

    assert_eq!(outcome, DeliveryOutcome::Ignored(IgnoreReason::NotActionable));
    assert!(publisher.published().is_empty());
    assert!(host.comments().is_empty());
}
