//! Oracle provider settings

use crate::provider::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default local Ollama endpoint
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Settings for choosing and reaching an oracle provider.
///
/// Provider priority: a running local Ollama, then DeepSeek, Groq and OpenAI
/// (the first one with an API key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleSettings {
    /// Base URL of the local Ollama server
    pub ollama_base_url: String,

    /// Whether to probe for a local Ollama server at all
    pub probe_local: bool,

    /// Timeout for the local probe in milliseconds
    pub probe_timeout_ms: u64,

    /// Timeout for completion requests in seconds
    pub request_timeout_secs: u64,

    /// DeepSeek API key
    pub deepseek_api_key: Option<String>,

    /// Groq API key
    pub groq_api_key: Option<String>,

    /// OpenAI API key
    pub openai_api_key: Option<String>,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            ollama_base_url: DEFAULT_OLLAMA_URL.to_string(),
            probe_local: true,
            probe_timeout_ms: 1000,
            request_timeout_secs: 30,
            deepseek_api_key: None,
            groq_api_key: None,
            openai_api_key: None,
        }
    }
}

impl OracleSettings {
    /// Read keys and the Ollama URL from the environment.
    ///
    /// Uses `DEEPSEEK_API_KEY`, `GROQ_API_KEY`, `OPENAI_API_KEY` and
    /// `OLLAMA_BASE_URL`; empty values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            ollama_base_url: get("OLLAMA_BASE_URL").unwrap_or(defaults.ollama_base_url),
            deepseek_api_key: get("DEEPSEEK_API_KEY"),
            groq_api_key: get("GROQ_API_KEY"),
            openai_api_key: get("OPENAI_API_KEY"),
            ..defaults
        }
    }

    /// Builder: set the DeepSeek key
    pub fn deepseek_key(mut self, key: &str) -> Self {
        self.deepseek_api_key = Some(key.to_string());
        self
    }

    /// Builder: set the Groq key
    pub fn groq_key(mut self, key: &str) -> Self {
        self.groq_api_key = Some(key.to_string());
        self
    }

    /// Builder: set the OpenAI key
    pub fn openai_key(mut self, key: &str) -> Self {
        self.openai_api_key = Some(key.to_string());
        self
    }

    /// Builder: skip the local Ollama probe
    pub fn without_local_probe(mut self) -> Self {
        self.probe_local = false;
        self
    }

    /// Builder: set the Ollama base URL
    pub fn ollama_url(mut self, url: &str) -> Self {
        self.ollama_base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Config for the local Ollama server
    pub fn local_config(&self) -> ProviderConfig {
        ProviderConfig::ollama(&self.ollama_base_url).timeout_secs(self.request_timeout_secs)
    }

    /// First remote provider with a key, in priority order
    pub fn remote_config(&self) -> Option<ProviderConfig> {
        let config = if let Some(key) = &self.deepseek_api_key {
            ProviderConfig::deepseek(key)
        } else if let Some(key) = &self.groq_api_key {
            ProviderConfig::groq(key)
        } else if let Some(key) = &self.openai_api_key {
            ProviderConfig::openai(key)
        } else {
            return None;
        };
        Some(config.timeout_secs(self.request_timeout_secs))
    }

    /// True when at least one remote provider has a key
    pub fn has_remote(&self) -> bool {
        self.remote_config().is_some()
    }
}
