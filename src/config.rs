//! TOML configuration for the answer client.
//!
//! Every section is optional; a missing section falls back to the built-in
//! defaults. The service base URL is deployment configuration and can be
//! overridden by the `ASKAI_BASE_URL` environment variable and by the
//! `--base-url` flag, in that order of increasing precedence.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// Environment variable overriding `[service].base_url`.
pub const BASE_URL_ENV: &str = "ASKAI_BASE_URL";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub examples: ExamplesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Client-side request timeout. Unset means the network stack's defaults.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

/// What to do when a question is submitted while another is still pending.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Dispatch anyway; only the latest request may update the state.
    #[default]
    DiscardStale,
    /// Refuse the new submission until the pending one settles.
    Reject,
    /// Wait for the pending submission, then dispatch.
    Queue,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExamplesConfig {
    #[serde(default = "default_questions")]
    pub questions: Vec<String>,
}

impl Default for ExamplesConfig {
    fn default() -> Self {
        Self {
            questions: default_questions(),
        }
    }
}

fn default_questions() -> Vec<String> {
    [
        "What is Physical AI?",
        "Explain ROS 2 nodes and topics",
        "How does Gazebo simulation work?",
        "What is NVIDIA Isaac Sim?",
        "How do humanoid robots maintain balance?",
        "What are VLA models in robotics?",
    ]
    .iter()
    .map(|q| q.to_string())
    .collect()
}

impl ServiceConfig {
    /// Parsed base URL with any trailing slash removed from the path.
    pub fn base(&self) -> Result<Url> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed)
            .with_context(|| format!("service.base_url is not a valid URL: {}", self.base_url))?;
        match url.scheme() {
            "http" | "https" => {}
            other => bail!("service.base_url must use http or https, got '{}'", other),
        }
        if url.cannot_be_a_base() {
            bail!("service.base_url cannot be used as a base: {}", self.base_url);
        }
        Ok(url)
    }
}

impl Config {
    /// Apply base URL overrides: the environment value first, then the CLI
    /// value, so the CLI wins when both are present.
    pub fn with_base_url_overrides(mut self, env: Option<String>, cli: Option<String>) -> Self {
        for value in [env, cli].into_iter().flatten() {
            if !value.trim().is_empty() {
                self.service.base_url = value;
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.service.base()?;

        if self.service.timeout_secs == Some(0) {
            bail!("service.timeout_secs must be > 0 when set");
        }

        if let Some(pos) = self
            .examples
            .questions
            .iter()
            .position(|q| q.trim().is_empty())
        {
            bail!("examples.questions[{}] must not be blank", pos);
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    config.validate()?;
    Ok(config)
}

/// Load the config file if it exists, otherwise the built-in defaults.
///
/// `required` makes a missing file an error (an explicitly passed path).
/// Overrides are applied and the final result is validated.
pub fn resolve_config(path: &Path, required: bool, cli_base_url: Option<String>) -> Result<Config> {
    let config = if path.exists() || required {
        load_config(path)?
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Config::default()
    };

    let config =
        config.with_base_url_overrides(std::env::var(BASE_URL_ENV).ok(), cli_base_url);
    config.validate()?;
    Ok(config)
}
