//! Run configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then the
//! `ROOMCHECK_BASE_URL` environment variable, then command-line overrides.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Origin and `/api` prefix of the deployment under test.
pub const DEFAULT_BASE_URL: &str = "https://learncheck-5.preview.emergentagent.com/api";

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Pause between the first submit and the re-submit in the student flow.
pub const DEFAULT_RESUBMIT_DELAY_MS: u64 = 1000;

/// Environment variable that overrides the base URL.
pub const BASE_URL_ENV: &str = "ROOMCHECK_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub resubmit_delay_ms: u64,
    pub quiet: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            resubmit_delay_ms: DEFAULT_RESUBMIT_DELAY_MS,
            quiet: false,
        }
    }
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub resubmit_delay_ms: Option<u64>,
    pub quiet: bool,
}

impl RunConfig {
    /// Config pointing at `base_url` with every other field defaulted.
    pub fn for_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut config = Self {
            base_url: base_url.into(),
            ..Self::default()
        };
        config.normalize()?;
        Ok(config)
    }

    /// Parse a TOML document. Unknown keys are rejected.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).context("Failed to parse config file")?;
        Ok(file.into())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Build the effective configuration from all sources.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }

        config.apply(overrides);
        config.normalize()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(url) = &overrides.base_url {
            self.base_url = url.clone();
        }
        if let Some(delay) = overrides.resubmit_delay_ms {
            self.resubmit_delay_ms = delay;
        }
        if overrides.quiet {
            self.quiet = true;
        }
    }

    fn normalize(&mut self) -> Result<()> {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        let url = reqwest::Url::parse(&trimmed)
            .with_context(|| format!("Invalid base URL '{trimmed}'"))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            bail!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            );
        }
        if self.connect_timeout_secs == 0 {
            bail!("connect_timeout_secs must be greater than zero");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        self.base_url = trimmed;
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resubmit_delay(&self) -> Duration {
        Duration::from_millis(self.resubmit_delay_ms)
    }
}

/// On-disk layout: everything lives under a `[run]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    run: FileSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSection {
    base_url: Option<String>,
    connect_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    resubmit_delay_ms: Option<u64>,
    quiet: Option<bool>,
}

impl From<ConfigFile> for RunConfig {
    fn from(file: ConfigFile) -> Self {
        let defaults = RunConfig::default();
        let run = file.run;
        Self {
            base_url: run.base_url.unwrap_or(defaults.base_url),
            connect_timeout_secs: run
                .connect_timeout_secs
                .unwrap_or(defaults.connect_timeout_secs),
            request_timeout_secs: run
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            resubmit_delay_ms: run.resubmit_delay_ms.unwrap_or(defaults.resubmit_delay_ms),
            quiet: run.quiet.unwrap_or(defaults.quiet),
        }
    }
}
