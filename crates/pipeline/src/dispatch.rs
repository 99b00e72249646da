//! The delivery dispatcher: sequences every step for one webhook delivery.
//!
//! Steps run in a fixed order with no retries:
//!
//! 1. trigger text selection and trigger matching,
//! 2. configuration extraction and resolution,
//! 3. endpoint resolution (at most one platform lookup),
//! 4. job assembly and serialization,
//! 5. publish to the trigger repository,
//! 6. confirmation comment.
//!
//! A failure in 5 or 6 aborts the delivery. A successful publish followed by a
//! failed comment is not rolled back.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    adapter::{resolve_target, Adapted},
    extract::{extract_config, ConfigBlockParser},
    job::confirmation_message,
    BenchBotError, BenchmarkJob, CodeHost, DeliveryHandler, JobPublisher, TriggerMatcher,
    WebhookEvent,
};

/// Why a delivery was acknowledged without dispatching anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The event kind, action, or sender is not one benchbot acts on.
    NotActionable,
    /// The text does not contain the trigger phrase.
    NoTrigger,
}

/// What happened to a delivery that was handled without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Ignored(IgnoreReason),
    Dispatched(BenchmarkJob),
}

/// Production [`DeliveryHandler`].
pub struct BenchmarkDispatcher {
    trigger: TriggerMatcher,
    parser: Arc<dyn ConfigBlockParser>,
    host: Arc<dyn CodeHost>,
    publisher: Arc<dyn JobPublisher>,
}

impl BenchmarkDispatcher {
    pub fn new(
        trigger: TriggerMatcher,
        parser: Arc<dyn ConfigBlockParser>,
        host: Arc<dyn CodeHost>,
        publisher: Arc<dyn JobPublisher>,
    ) -> Self {
        Self {
            trigger,
            parser,
            host,
            publisher,
        }
    }
}

#[async_trait]
impl DeliveryHandler for BenchmarkDispatcher {
    async fn handle(&self, event: WebhookEvent) -> Result<DeliveryOutcome, BenchBotError> {
        let Some(text) = event.trigger_text() else {
            tracing::debug!(kind = event.kind(), "Event is not actionable");
            return Ok(DeliveryOutcome::Ignored(IgnoreReason::NotActionable));
        };
        let Some(matched) = self.trigger.find(text) else {
            tracing::debug!(kind = event.kind(), "No trigger phrase in event text");
            return Ok(DeliveryOutcome::Ignored(IgnoreReason::NoTrigger));
        };

        let options = extract_config(self.parser.as_ref(), matched);

        let target = match resolve_target(&event, self.host.as_ref()).await? {
            Adapted::Target(target) => target,
            Adapted::Unsupported | Adapted::MissingRepository => {
                return Ok(DeliveryOutcome::Ignored(IgnoreReason::NotActionable));
            }
        };

        let job = BenchmarkJob::assemble(&options, &target);
        let serialized = job.to_pretty_json()?;

        tracing::info!(
            repository = %target.origin,
            discussion = %target.discussion,
            current = %target.current.sha,
            reference = %target.reference.sha,
            "Dispatching benchmark job"
        );
        self.publisher
            .publish(&serialized, &job.commit_message())
            .await?;

        self.host
            .post_comment(
                &target.origin,
                target.discussion,
                &confirmation_message(&serialized),
            )
            .await?;

        Ok(DeliveryOutcome::Dispatched(job))
    }
}
