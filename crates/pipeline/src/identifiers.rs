//! Newtype domain identifiers.
//!
//! Every value that identifies something on the code-hosting platform is a
//! distinct newtype wrapping a primitive. This prevents accidentally passing a
//! [`CommitSha`] where a [`RepositoryName`] is expected even though both are
//! strings under the hood.
//!
//! All identifiers serialize as their inner value, so they can be embedded
//! directly in webhook payload types and in the job descriptor. String
//! identifiers deserialize through `new()`, so an empty value is rejected.

use serde::{Deserialize, Serialize};

/// Returned when a string identifier is deserialized from an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyIdentifier(&'static str);

impl std::fmt::Display for EmptyIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} must not be empty", self.0)
    }
}

impl std::error::Error for EmptyIdentifier {}

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display, and
// serde conversions that go through new().
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl TryFrom<String> for $name {
            type Error = EmptyIdentifier;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(EmptyIdentifier(stringify!($name)))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (GitHub-assigned integers).
// Generates: struct (Copy), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

u64_id! {
    /// Number of an issue or pull request within its repository.
    ///
    /// Pull requests share the issue number space, so the same value routes
    /// both the pull-request lookup and the confirmation comment.
    IssueNumber
}

string_id! {
    /// Identifies a GitHub repository in `"owner/repo"` format.
    RepositoryName
}

string_id! {
    /// A Git commit SHA (40-character lowercase hex string).
    CommitSha
}

impl RepositoryName {
    /// Splits the full name into its `(owner, repo)` parts.
    ///
    /// Returns `None` when the name does not contain exactly one `/`.
    pub fn split(&self) -> Option<(&str, &str)> {
        let (owner, repo) = self.0.split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            None
        } else {
            Some((owner, repo))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_identifiers_are_rejected() {
        assert!(RepositoryName::new("").is_none());
        assert!(CommitSha::new("").is_none());
    }

    #[test]
    fn repository_name_splits_into_owner_and_repo() {
        let name = RepositoryName::new("octo/widgets").unwrap();
        assert_eq!(name.split(), Some(("octo", "widgets")));
        assert_eq!(RepositoryName::new("no-slash").unwrap().split(), None);
        assert_eq!(RepositoryName::new("a/b/c").unwrap().split(), None);
    }

    #[test]
    fn identifiers_serialize_as_their_inner_value() {
        let sha = CommitSha::new("abc123").unwrap();
        assert_eq!(serde_json::to_string(&sha).unwrap(), "\"abc123\"");
        assert_eq!(serde_json::to_string(&IssueNumber::new(42)).unwrap(), "42");
    }

    #[test]
    fn empty_string_identifiers_fail_to_deserialize() {
        let err = serde_json::from_str::<CommitSha>("\"\"").unwrap_err();
        assert!(err.to_string().contains("CommitSha must not be empty"));
        assert!(serde_json::from_str::<RepositoryName>("\"\"").is_err());
        assert_eq!(
            serde_json::from_str::<CommitSha>("\"abc123\"").unwrap(),
            CommitSha::new("abc123").unwrap()
        );
    }
}
