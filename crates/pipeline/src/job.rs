//! The benchmark job descriptor handed to the external pipeline.
//!
//! The serialized form is a wire contract: the downstream pipeline reads it and
//! the confirmation comment echoes it verbatim, so key order and formatting are
//! fixed. Field declaration order below *is* the key order.

use serde::{ser::Error as _, Serialize};

use crate::{CommitSha, ComparisonTarget, ConfigOptions, EventEndpoints, IssueNumber, RepositoryName};

/// Spec used for a side when neither the side nor the top level sets one.
pub const DEFAULT_SPEC: &str = "sirius@develop";

/// Text preceding the job in the confirmation comment.
pub const CONFIRMATION_PREAMBLE: &str =
    "Benchmark job submitted. The following job descriptor was sent to the benchmarking pipeline:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Compare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Pr,
}

/// One build in the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildTarget {
    pub spec: String,
    pub args: Vec<String>,
    pub repo: RepositoryName,
    pub sha: CommitSha,
}

/// Where the pipeline reports results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTarget {
    pub repository: RepositoryName,
    pub issue: IssueNumber,
    #[serde(rename = "type")]
    pub kind: ReportKind,
}

/// A complete `compare` job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkJob {
    #[serde(rename = "type")]
    pub kind: JobKind,
    pub reference: BuildTarget,
    pub current: BuildTarget,
    pub report_to: ReportTarget,
}

impl BenchmarkJob {
    /// Combines resolved options with the event's endpoints, substituting
    /// [`DEFAULT_SPEC`] and an empty argument list for anything still absent.
    pub fn assemble(options: &ConfigOptions, target: &ComparisonTarget) -> Self {
        Self {
            kind: JobKind::Compare,
            reference: build_target(
                options.reference_spec.as_ref(),
                options.reference_args.as_ref(),
                &target.reference,
            ),
            current: build_target(
                options.current_spec.as_ref(),
                options.current_args.as_ref(),
                &target.current,
            ),
            report_to: ReportTarget {
                repository: target.origin.clone(),
                issue: target.discussion,
                kind: ReportKind::Pr,
            },
        }
    }

    /// Pretty-printed JSON with four-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(serde_json::Error::custom)
    }

    pub fn commit_message(&self) -> String {
        format!("Benchmark {} vs {}", self.current.sha, self.reference.sha)
    }
}

fn build_target(
    spec: Option<&String>,
    args: Option<&Vec<String>>,
    endpoints: &EventEndpoints,
) -> BuildTarget {
    BuildTarget {
        spec: spec.map_or_else(|| DEFAULT_SPEC.to_string(), Clone::clone),
        args: args.cloned().unwrap_or_default(),
        repo: endpoints.repository.clone(),
        sha: endpoints.sha.clone(),
    }
}

/// Body of the comment posted back to the discussion.
pub fn confirmation_message(serialized_job: &str) -> String {
    format!("{CONFIRMATION_PREAMBLE}\n\n```json\n{serialized_job}\n```")
}
