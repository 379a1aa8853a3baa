//! Configuration types for logscope.
//!
//! [`Config::load`] layers, lowest priority first: the embedded defaults,
//! `$XDG_CONFIG_HOME/logscope/config.toml` (or an explicit path), and the
//! conventional environment variables (`KIBANA_URL`, `ELASTIC_API_KEY`, ...).
//! [`Config::defaults`] returns the embedded defaults without touching the
//! filesystem or environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[kibana]
data_view_id   = "86091596-a33a-4b4b-b825-d387bb6e3c5e"
discover_route = "discover#/view"

[elastic]

[search]
max_size             = 10000
default_size         = 100
probe_timeout_secs   = 10
fetch_timeout_secs   = 30
accept_invalid_certs = true
error_body_limit     = 512
"#;

/// Environment variable → config key.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("KIBANA_URL", "kibana.url"),
    ("KIBANA_API_KEY", "kibana.api_key"),
    ("KIBANA_USERNAME", "kibana.username"),
    ("KIBANA_PASSWORD", "kibana.password"),
    ("DATA_VIEW_ID", "kibana.data_view_id"),
    ("ELASTIC_URL", "elastic.url"),
    ("ELASTIC_API_KEY", "elastic.api_key"),
];

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration handed to the search facade.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub kibana: KibanaConfig,
    #[serde(default)]
    pub elastic: ElasticConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// `[kibana]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct KibanaConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_data_view_id")]
    pub data_view_id: String,
    #[serde(default = "default_discover_route")]
    pub discover_route: String,
}

fn default_data_view_id() -> String { "86091596-a33a-4b4b-b825-d387bb6e3c5e".to_string() }
fn default_discover_route() -> String { "discover#/view".to_string() }

impl Default for KibanaConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            username: None,
            password: None,
            data_view_id: default_data_view_id(),
            discover_route: default_discover_route(),
        }
    }
}

/// `[elastic]` section. `url` may list several comma-separated hosts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElasticConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ElasticConfig {
    /// Configured hosts, trimmed, without trailing slashes.
    pub fn hosts(&self) -> Vec<String> {
        self.url
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|h| h.trim().trim_end_matches('/'))
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// `[search]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    #[serde(default = "default_size")]
    pub default_size: usize,
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
    #[serde(default = "default_error_body_limit")]
    pub error_body_limit: usize,
}

fn default_max_size() -> usize { 10_000 }
fn default_size() -> usize { 100 }
fn default_probe_timeout_secs() -> u64 { 10 }
fn default_fetch_timeout_secs() -> u64 { 30 }
fn default_accept_invalid_certs() -> bool { true }
fn default_error_body_limit() -> usize { 512 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            default_size: default_size(),
            probe_timeout_secs: default_probe_timeout_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            accept_invalid_certs: default_accept_invalid_certs(),
            error_body_limit: default_error_body_limit(),
        }
    }
}

impl SearchConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from the default config path, layered on top of the built-in
    /// defaults and overridden by environment variables. The file is optional.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Like [`Config::load`] but reading `path` instead of the default path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false));

        for (var, key) in ENV_OVERRIDES {
            let value = std::env::var(var).ok().filter(|v| !v.is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        builder.build()?.try_deserialize().map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Dashboard base URL without a trailing slash, if configured.
    pub fn kibana_url(&self) -> Option<&str> {
        self.kibana
            .url
            .as_deref()
            .map(|u| u.trim().trim_end_matches('/'))
            .filter(|u| !u.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `$XDG_CONFIG_HOME/logscope/config.toml`, falling back to `~/.config`.
pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("logscope")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
