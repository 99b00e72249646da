//! Configuration extraction from the triggering comment.
//!
//! The comment is untrusted free text, so extraction is best effort:
//! [`extract_config`] never fails. Every [`ExtractionError`] is logged and
//! replaced with all-absent [`ConfigOptions`], which means the benchmark runs
//! with the default spec and arguments. "No block", "invalid YAML", "not a
//! mapping" and "wrong shape" are distinguished in the log output only.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use thiserror::Error;

use crate::config::{ConfigOptions, RawConfig};

/// Why a comment did not yield a configuration mapping.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The comment contains no top-level fenced code block.
    #[error("no fenced configuration block found")]
    NoCodeBlock,

    /// The block is not valid YAML.
    #[error("configuration block is not valid YAML: {0}")]
    InvalidYaml(#[source] serde_yaml::Error),

    /// The block parsed, but its top level is not a mapping.
    #[error("configuration block is not a mapping")]
    NotAMapping,

    /// The mapping has keys of the wrong type (e.g. `spec: [1, 2]`).
    #[error("configuration block has an invalid shape: {0}")]
    InvalidShape(#[source] serde_yaml::Error),
}

impl ExtractionError {
    /// Short machine-readable cause, used as a structured log field.
    pub fn cause(&self) -> &'static str {
        match self {
            Self::NoCodeBlock => "no_code_block",
            Self::InvalidYaml(_) => "invalid_yaml",
            Self::NotAMapping => "not_a_mapping",
            Self::InvalidShape(_) => "invalid_shape",
        }
    }
}

/// Turns comment text into a raw configuration mapping.
///
/// Kept behind a trait so the resolution logic can be exercised without a
/// particular markdown or YAML library.
pub trait ConfigBlockParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<RawConfig, ExtractionError>;
}

/// Default parser: CommonMark for block structure, YAML for the block body.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownYamlParser;

impl ConfigBlockParser for MarkdownYamlParser {
    fn parse(&self, text: &str) -> Result<RawConfig, ExtractionError> {
        let block = first_fenced_block(text).ok_or(ExtractionError::NoCodeBlock)?;
        let value: serde_yaml::Value =
            serde_yaml::from_str(&block).map_err(ExtractionError::InvalidYaml)?;
        if !value.is_mapping() {
            return Err(ExtractionError::NotAMapping);
        }
        serde_yaml::from_value(value).map_err(ExtractionError::InvalidShape)
    }
}

/// Returns the contents of the first fenced code block that sits at the top
/// level of the document (not inside a list item or block quote).
pub fn first_fenced_block(text: &str) -> Option<String> {
    let mut depth = 0usize;
    let mut capturing = false;
    let mut contents = String::new();

    for event in Parser::new(text) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_))) if depth == 0 => {
                capturing = true;
                depth += 1;
            }
            Event::Start(_) => depth += 1,
            Event::End(TagEnd::CodeBlock) if capturing => return Some(contents),
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(chunk) if capturing => contents.push_str(&chunk),
            _ => {}
        }
    }

    None
}

/// Extracts resolved options from the matched trigger text.
///
/// This is the single point where extraction errors are discarded.
pub fn extract_config(parser: &dyn ConfigBlockParser, text: &str) -> ConfigOptions {
    match parser.parse(text) {
        Ok(raw) => raw.resolve(),
        Err(ExtractionError::NoCodeBlock) => {
            tracing::info!(cause = "no_code_block", "No configuration block; using defaults");
            ConfigOptions::default()
        }
        Err(err) => {
            tracing::warn!(cause = err.cause(), error = %err, "Ignoring configuration block; using defaults");
            ConfigOptions::default()
        }
    }
}
