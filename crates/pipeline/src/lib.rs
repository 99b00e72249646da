//! Benchmark dispatch domain for benchbot.
//!
//! This crate turns a decoded webhook delivery into a benchmark job: it detects
//! the trigger phrase, extracts and resolves the user's configuration, resolves
//! the pull request's head and base commits, and assembles the job descriptor.
//! Infrastructure crates implement the port traits defined here; they never add
//! domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no network or
//! file-system dependencies. It defines *what* is needed; infrastructure crates
//! define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`RepositoryName`, `CommitSha`, etc.) |
//! | [`errors`] | Per-delivery and port error types |
//! | [`trigger`] | Trigger phrase matcher |
//! | [`extract`] | Fenced-block extraction with fallback to defaults |
//! | [`config`] | Raw configuration and the side/top-level cascade |
//! | [`event`] | Webhook payload model and the `WebhookEvent` union |
//! | [`adapter`] | Comparison endpoints for an event |
//! | [`job`] | Job descriptor assembly and serialization |
//! | [`ports`] | `CodeHost`, `JobPublisher`, `DeliveryHandler` |
//! | [`dispatch`] | `BenchmarkDispatcher`, which sequences all of the above |

pub mod adapter;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod event;
pub mod extract;
pub mod identifiers;
pub mod job;
pub mod ports;
pub mod trigger;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use adapter::{resolve_target, Adapted, ComparisonTarget, EventEndpoints};
pub use config::{ConfigOptions, RawConfig, SideConfig};
pub use dispatch::{BenchmarkDispatcher, DeliveryOutcome, IgnoreReason};
pub use errors::{BenchBotError, PlatformError, PublishError};
pub use event::{
    Account, Comment, Issue, IssueCommentEvent, PullRequest, PullRequestEvent, PullRequestRef,
    Repository, WebhookEvent,
};
pub use extract::{extract_config, ConfigBlockParser, ExtractionError, MarkdownYamlParser};
pub use identifiers::{CommitSha, EmptyIdentifier, IssueNumber, RepositoryName};
pub use job::{
    confirmation_message, BenchmarkJob, BuildTarget, JobKind, ReportKind, ReportTarget,
    CONFIRMATION_PREAMBLE, DEFAULT_SPEC,
};
pub use ports::{CodeHost, DeliveryHandler, JobPublisher};
pub use trigger::TriggerMatcher;
