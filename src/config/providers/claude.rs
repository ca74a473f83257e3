use serde::{Deserialize, Serialize};
use url::Url;

use super::{ProviderDefaults, base_url};
use crate::config::deserialize_secret_lax;

/// Claude (Anthropic Messages API) provider configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClaudeConfig {
    /// API key sent as `x-api-key`.
    /// TOML: `providers.claude.api_key`. Env: `ANTHROPIC_API_KEY`.
    #[serde(default, deserialize_with = "deserialize_secret_lax")]
    pub api_key: Option<String>,

    /// TOML: `providers.claude.api_url`. Default: `https://api.anthropic.com`.
    #[serde(default = "default_api_url")]
    pub api_url: Url,

    /// TOML: `providers.claude.model`. Default: `claude-3-5-sonnet-20241022`.
    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound on generated tokens per call.
    /// TOML: `providers.claude.max_tokens`. Default: `4096`.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Optional upstream HTTP proxy.
    /// TOML: `providers.claude.proxy`. Falls back to `providers.defaults.proxy` when unset.
    #[serde(default)]
    pub proxy: Option<Url>,
}

#[derive(Debug, Clone)]
pub struct ClaudeResolvedConfig {
    pub api_key: Option<String>,
    pub api_url: Url,
    pub model: String,
    pub max_tokens: u32,
    pub proxy: Option<Url>,
    pub connect_timeout_secs: u64,
}

impl ClaudeConfig {
    pub fn resolve(&self, defaults: &ProviderDefaults) -> ClaudeResolvedConfig {
        ClaudeResolvedConfig {
            api_key: self.api_key.clone(),
            api_url: base_url(&self.api_url),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            proxy: self.proxy.clone().or_else(|| defaults.proxy.clone()),
            connect_timeout_secs: defaults.connect_timeout_secs,
        }
    }
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            proxy: None,
        }
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.anthropic.com").expect("valid default Anthropic API url")
}

fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}
