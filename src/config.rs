use std::net::SocketAddr;

use thiserror::Error;

use crate::pipeline::facilities::ThirdEntryPolicy;

/// Application-level constants
pub const APP_NAME: &str = "HealthMind";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "medgemma:4b";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_BIND: &str = "127.0.0.1:9460";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "healthmind=debug,healthmind_lib=debug,tower_http=info"
    } else {
        "healthmind=info,healthmind_lib=info,tower_http=warn"
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not a valid timeout in seconds: {value}")]
    InvalidTimeout { key: &'static str, value: String },

    #[error("{key} is not a valid socket address: {value}")]
    InvalidBind { key: &'static str, value: String },

    #[error("{key}: {reason}")]
    InvalidFallbackPolicy { key: &'static str, reason: String },
}

/// Runtime settings, read from `HEALTHMIND_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub ollama_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub bind: SocketAddr,
    pub fallback_policy: ThirdEntryPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let ollama_url = get("HEALTHMIND_OLLAMA_URL").unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
        let model = get("HEALTHMIND_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = match get("HEALTHMIND_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        key: "HEALTHMIND_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let bind_value = get("HEALTHMIND_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_value.parse().map_err(|_| ConfigError::InvalidBind {
            key: "HEALTHMIND_BIND",
            value: bind_value.clone(),
        })?;

        let fallback_policy = match get("HEALTHMIND_FALLBACK_POLICY") {
            Some(value) => value.parse().map_err(|reason| ConfigError::InvalidFallbackPolicy {
                key: "HEALTHMIND_FALLBACK_POLICY",
                reason,
            })?,
            None => ThirdEntryPolicy::default(),
        };

        Ok(Self {
            ollama_url,
            model,
            timeout_secs,
            bind,
            fallback_policy,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            bind: SocketAddr::from(([127, 0, 0, 1], 9460)),
            fallback_policy: ThirdEntryPolicy::default(),
        }
    }
}
