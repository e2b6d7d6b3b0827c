use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::events::EventKind;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
    #[serde(default = "default_prime_on_connect")]
    pub prime_on_connect: bool,
    #[serde(default = "default_subscriptions")]
    pub subscriptions: Vec<EventKind>,
    #[serde(default)]
    pub trace_messages: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            retry_interval_ms: default_retry_interval_ms(),
            prime_on_connect: default_prime_on_connect(),
            subscriptions: default_subscriptions(),
            trace_messages: false,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid config")
    }

    /// Read the config from `path`.
    /// A file that isn't valid JSON falls back to the defaults instead of failing.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self::from_json(&json).unwrap_or_else(|e| {
            log::error!("{e:#} ({}), using defaults", path.display());
            Self::default()
        }))
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }
}

// DEFAULTS //
fn default_retry_interval_ms() -> u64 {
    1000
}

fn default_prime_on_connect() -> bool {
    true
}

fn default_subscriptions() -> Vec<EventKind> {
    EventKind::ALL.to_vec()
}
