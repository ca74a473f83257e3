use serde::{Deserialize, Serialize};
use url::Url;

use super::{ProviderDefaults, base_url};
use crate::config::deserialize_secret_lax;

/// Gemini provider configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`.
    /// TOML: `providers.gemini.api_key`. Env: `GEMINI_API_KEY`.
    #[serde(default, deserialize_with = "deserialize_secret_lax")]
    pub api_key: Option<String>,

    /// Base URL of the Generative Language API.
    /// TOML: `providers.gemini.api_url`. Default: `https://generativelanguage.googleapis.com`.
    #[serde(default = "default_api_url")]
    pub api_url: Url,

    /// TOML: `providers.gemini.model`. Default: `gemini-3-flash-preview`.
    #[serde(default = "default_model")]
    pub model: String,

    /// Optional upstream HTTP proxy.
    /// TOML: `providers.gemini.proxy`. Falls back to `providers.defaults.proxy` when unset.
    #[serde(default)]
    pub proxy: Option<Url>,
}

#[derive(Debug, Clone)]
pub struct GeminiResolvedConfig {
    pub api_key: Option<String>,
    pub api_url: Url,
    pub model: String,
    pub proxy: Option<Url>,
    pub connect_timeout_secs: u64,
}

impl GeminiConfig {
    pub fn resolve(&self, defaults: &ProviderDefaults) -> GeminiResolvedConfig {
        GeminiResolvedConfig {
            api_key: self.api_key.clone(),
            api_url: base_url(&self.api_url),
            model: self.model.clone(),
            proxy: self.proxy.clone().or_else(|| defaults.proxy.clone()),
            connect_timeout_secs: defaults.connect_timeout_secs,
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            model: default_model(),
            proxy: None,
        }
    }
}

fn default_api_url() -> Url {
    Url::parse("https://generativelanguage.googleapis.com")
        .expect("valid default Gemini API url")
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}
