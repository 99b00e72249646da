//! Trigger phrase detection.

use regex::{Regex, RegexBuilder};

/// Tests comment text for the configured trigger.
///
/// Matching is a plain existence test anywhere in the text. A matcher built
/// with [`TriggerMatcher::for_phrase`] wraps the phrase as `.*phrase.*` with
/// dot-matches-newline enabled, so the matched span is the whole comment body
/// and can be handed to the configuration extractor unchanged.
#[derive(Debug, Clone)]
pub struct TriggerMatcher {
    pattern: Regex,
}

impl TriggerMatcher {
    /// Builds a matcher for a literal trigger phrase, ignoring case.
    pub fn for_phrase(phrase: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(&format!(".*{}.*", regex::escape(phrase)))
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()?;
        Ok(Self { pattern })
    }

    /// Builds a matcher from a raw regular expression.
    pub fn from_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Returns the first matched span, or `None` when the trigger is absent.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern.find(text).map(|m| m.as_str())
    }

    /// Returns the pattern source, for logging.
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}
