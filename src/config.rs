//! Configuration module

use std::env;
use std::time::Duration;

use crate::cognitive::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_TIMEOUT};
use crate::cognitive::GeminiSettings;
use crate::dispatch::gateway::DEFAULT_GATEWAY_TIMEOUT;
use crate::dispatch::GatewaySettings;
use crate::pipeline::{PipelineConfig, DEFAULT_ENFORCE_THRESHOLD, DEFAULT_SCORING_THRESHOLD};

/// Application configuration. Read once at startup, immutable afterwards.
#[derive(Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Reasoning service credential; `None` disables cognitive validation calls
    pub gemini_api_key: Option<String>,

    pub gemini_model: String,

    pub gemini_base_url: String,

    pub gemini_timeout_secs: u64,

    /// Persistence gateway base URL
    pub gateway_base_url: String,

    pub gateway_user: String,

    pub gateway_password: String,

    pub gateway_timeout_secs: u64,

    /// Escalate at or above this ML score
    pub scoring_threshold: f64,

    /// Signal enforcement at or above this fused score
    pub aura_enforce_threshold: f64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8081),

            gemini_api_key: lookup("GEMINI_API_KEY")
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),

            gemini_model: lookup("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),

            gemini_base_url: lookup("GEMINI_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),

            gemini_timeout_secs: lookup("GEMINI_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_GEMINI_TIMEOUT.as_secs()),

            gateway_base_url: lookup("GATEWAY_BASE_URL")
                .unwrap_or_else(|| "http://localhost:8080".to_string()),

            gateway_user: lookup("GATEWAY_USER")
                .unwrap_or_else(|| "gateway".to_string()),

            gateway_password: lookup("GATEWAY_PASSWORD")
                .unwrap_or_default(),

            gateway_timeout_secs: lookup("GATEWAY_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_GATEWAY_TIMEOUT.as_secs()),

            scoring_threshold: threshold(&lookup, "SCORING_THRESHOLD", DEFAULT_SCORING_THRESHOLD),

            aura_enforce_threshold: threshold(&lookup, "AURA_ENFORCE_THRESHOLD", DEFAULT_ENFORCE_THRESHOLD),
        }
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            scoring_threshold: self.scoring_threshold,
            enforce_threshold: self.aura_enforce_threshold,
        }
    }

    pub fn gemini(&self) -> GeminiSettings {
        GeminiSettings {
            api_key: self.gemini_api_key.clone(),
            model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.clone(),
            timeout: Duration::from_secs(self.gemini_timeout_secs),
        }
    }

    pub fn gateway(&self) -> GatewaySettings {
        GatewaySettings {
            base_url: self.gateway_base_url.clone(),
            user: self.gateway_user.clone(),
            password: self.gateway_password.clone(),
            timeout: Duration::from_secs(self.gateway_timeout_secs),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_timeout_secs", &self.gemini_timeout_secs)
            .field("gateway_base_url", &self.gateway_base_url)
            .field("gateway_user", &self.gateway_user)
            .field("gateway_password", &"***")
            .field("gateway_timeout_secs", &self.gateway_timeout_secs)
            .field("scoring_threshold", &self.scoring_threshold)
            .field("aura_enforce_threshold", &self.aura_enforce_threshold)
            .finish()
    }
}

/// Parse a threshold in [0.0, 1.0], falling back to `default` otherwise
fn threshold<F>(lookup: &F, key: &str, default: f64) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<f64>() {
        Ok(value) if (0.0..=1.0).contains(&value) => value,
        _ => {
            tracing::warn!("Ignoring {}={:?}: expected a number in [0, 1], using {}", key, raw, default);
            default
        }
    }
}
