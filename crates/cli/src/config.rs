//! Process configuration, read once from the environment at startup.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TRIGGER: &str = "@benchbot run";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_JOB_PATH: &str = "job.json";
pub const DEFAULT_AUTHOR: &str = "benchbot";
pub const DEFAULT_EMAIL: &str = "benchbot@users.noreply.github.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// A credential whose `Debug` output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub github_token: Secret,
    pub webhook_secret: Secret,
    /// Clone URL of the repository job commits are pushed to.
    pub trigger_repo: String,
    pub host: IpAddr,
    pub port: u16,
    pub trigger_phrase: String,
    pub trigger_branch: String,
    pub job_path: PathBuf,
    pub commit_author: String,
    pub commit_email: String,
    pub github_api_url: String,
    /// OTLP collector endpoint; span export is disabled when absent.
    pub otlp_endpoint: Option<String>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));
        let or_default = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_owned());

        let host = match get("BENCHBOT_HOST") {
            Some(value) => value.parse().map_err(|err: std::net::AddrParseError| {
                ConfigError::Invalid {
                    name: "BENCHBOT_HOST",
                    value: value.clone(),
                    reason: err.to_string(),
                }
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match get("BENCHBOT_PORT") {
            Some(value) => value.parse().map_err(|err: std::num::ParseIntError| {
                ConfigError::Invalid {
                    name: "BENCHBOT_PORT",
                    value: value.clone(),
                    reason: err.to_string(),
                }
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            github_token: Secret::new(required("GITHUB_TOKEN")?),
            webhook_secret: Secret::new(required("WEBHOOK_SECRET")?),
            trigger_repo: required("BENCHBOT_TRIGGER_REPO")?,
            host,
            port,
            trigger_phrase: or_default("BENCHBOT_TRIGGER", DEFAULT_TRIGGER),
            trigger_branch: or_default("BENCHBOT_TRIGGER_BRANCH", DEFAULT_BRANCH),
            job_path: PathBuf::from(or_default("BENCHBOT_JOB_PATH", DEFAULT_JOB_PATH)),
            commit_author: or_default("BENCHBOT_COMMIT_AUTHOR", DEFAULT_AUTHOR),
            commit_email: or_default("BENCHBOT_COMMIT_EMAIL", DEFAULT_EMAIL),
            github_api_url: or_default("GITHUB_API_URL", github::DEFAULT_API_URL),
            otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
