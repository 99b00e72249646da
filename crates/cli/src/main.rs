//! benchbot entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Load configuration**: read [`config::BotConfig`] from the environment.
//! 2. **Wire observability**: install the JSON `tracing` subscriber and, when
//!    configured, the OTLP span exporter.
//! 3. **Construct infrastructure**: create the `GithubClient`, the
//!    `GitJobPublisher` and the comment parser, and inject them into a
//!    `BenchmarkDispatcher`.
//! 4. **Serve**: listen for webhook deliveries until Ctrl-C.

mod config;
mod telemetry;

use std::sync::Arc;

use anyhow::Context;
use github::GithubClient;
use listener::{ListenerState, WebhookSecret};
use pipeline::{BenchmarkDispatcher, MarkdownYamlParser, TriggerMatcher};
use vcs::{GitJobPublisher, PublisherSettings};

use crate::config::BotConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BotConfig::from_env().context("invalid configuration")?;
    let _telemetry = telemetry::init(config.otlp_endpoint.as_deref())
        .context("failed to initialise tracing")?;

    let code_host = GithubClient::new(config.github_token.expose(), &config.github_api_url)
        .context("failed to build GitHub client")?;

    let publisher = GitJobPublisher::new(PublisherSettings {
        remote_url: config.trigger_repo.clone(),
        branch: config.trigger_branch.clone(),
        job_path: config.job_path.clone(),
        token: Some(config.github_token.expose().to_owned()),
        author_name: config.commit_author.clone(),
        author_email: config.commit_email.clone(),
    })
    .context("invalid job publisher settings")?;
    tracing::info!(settings = ?publisher.settings(), "Job publisher ready");

    let trigger = TriggerMatcher::for_phrase(&config.trigger_phrase)
        .context("failed to compile trigger phrase")?;
    tracing::info!(pattern = trigger.as_str(), "Trigger matcher ready");

    let dispatcher = BenchmarkDispatcher::new(
        trigger,
        Arc::new(MarkdownYamlParser),
        Arc::new(code_host),
        Arc::new(publisher),
    );

    let state = Arc::new(ListenerState::new(
        WebhookSecret::new(config.webhook_secret.expose()),
        Arc::new(dispatcher),
    ));

    listener::serve(config.listen_addr(), state).await?;
    Ok(())
}
