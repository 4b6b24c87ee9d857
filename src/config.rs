//! Client configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/analyze";
pub const DEFAULT_API_KEY_ENV: &str = "MOODLENS_API_KEY";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RICH_EDITOR_HOSTS: &[&str] = &["docs.google.com"];
pub const DEFAULT_CLIPBOARD_POLL_MS: u64 = 100;
pub const DEFAULT_CLIPBOARD_TIMEOUT_MS: u64 = 1500;

/// Errors produced while building a [`ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint '{0}': expected an http(s) URL")]
    InvalidEndpoint(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

/// How rich-editor extraction falls back to the clipboard.
///
/// With `enabled = false` an empty editor surface fails fast instead of
/// racing the copy action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardPolicy {
    pub enabled: bool,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for ClipboardPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval: Duration::from_millis(DEFAULT_CLIPBOARD_POLL_MS),
            timeout: Duration::from_millis(DEFAULT_CLIPBOARD_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeouts: Timeouts,
    pub rich_editor_hosts: Vec<String>,
    pub clipboard: ClipboardPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            api_key_env: DEFAULT_API_KEY_ENV.to_owned(),
            timeouts: Timeouts::default(),
            rich_editor_hosts: DEFAULT_RICH_EDITOR_HOSTS.iter().map(|h| (*h).to_owned()).collect(),
            clipboard: ClipboardPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `MOODLENS_ENDPOINT`: default `http://localhost:8000/analyze`
    /// - `MOODLENS_API_KEY_ENV`: default `MOODLENS_API_KEY`
    /// - `MOODLENS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `MOODLENS_CONNECT_TIMEOUT_SECS`: default 10
    /// - `MOODLENS_RICH_EDITOR_HOSTS`: comma-separated, default `docs.google.com`
    /// - `MOODLENS_CLIPBOARD_FALLBACK`: default `true`
    /// - `MOODLENS_CLIPBOARD_POLL_MS`: default 100
    /// - `MOODLENS_CLIPBOARD_TIMEOUT_MS`: default 1500
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an http(s) URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let endpoint = match lookup("MOODLENS_ENDPOINT") {
            Some(raw) => parse_endpoint(&raw)?,
            None => defaults.endpoint,
        };
        let api_key_env = lookup("MOODLENS_API_KEY_ENV")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_key_env);
        let timeouts = Timeouts {
            request_secs: parse_timeout_secs(&lookup, "MOODLENS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_timeout_secs(&lookup, "MOODLENS_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let rich_editor_hosts = lookup("MOODLENS_RICH_EDITOR_HOSTS")
            .map(|raw| parse_host_list(&raw))
            .unwrap_or(defaults.rich_editor_hosts);
        let clipboard = ClipboardPolicy {
            enabled: parse_bool(&lookup, "MOODLENS_CLIPBOARD_FALLBACK", true),
            poll_interval: Duration::from_millis(parse_u64(
                &lookup,
                "MOODLENS_CLIPBOARD_POLL_MS",
                DEFAULT_CLIPBOARD_POLL_MS,
            )),
            timeout: Duration::from_millis(parse_u64(
                &lookup,
                "MOODLENS_CLIPBOARD_TIMEOUT_MS",
                DEFAULT_CLIPBOARD_TIMEOUT_MS,
            )),
        };

        Ok(Self { endpoint, api_key_env, timeouts, rich_editor_hosts, clipboard })
    }

    /// Replace the endpoint, validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not an http(s) URL.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ConfigError> {
        self.endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }
}

fn parse_endpoint(raw: &str) -> Result<String, ConfigError> {
    let endpoint = raw.trim();
    let lowered = endpoint.to_ascii_lowercase();
    let rest = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"));
    match rest {
        Some(rest) if !rest.is_empty() => Ok(endpoint.to_owned()),
        _ => Err(ConfigError::InvalidEndpoint(raw.to_owned())),
    }
}

fn parse_host_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|host| host.trim().to_ascii_lowercase())
        .filter(|host| !host.is_empty())
        .collect()
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, default, "ignoring non-numeric config value");
            default
        }
    }
}

/// A zero timeout would fail every request at once, so it falls back too.
fn parse_timeout_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    match parse_u64(lookup, key, default) {
        0 => {
            tracing::warn!(key, default, "ignoring zero timeout");
            default
        }
        secs => secs,
    }
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(key, value = %raw, default, "ignoring non-boolean config value");
            default
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
