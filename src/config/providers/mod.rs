mod claude;
mod gemini;

pub use claude::{ClaudeConfig, ClaudeResolvedConfig};
pub use gemini::{GeminiConfig, GeminiResolvedConfig};

use serde::{Deserialize, Serialize};
use url::Url;

/// Global provider defaults (used when provider-level config is unset).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderDefaults {
    /// Optional upstream HTTP proxy. If set, used for reqwest clients.
    /// TOML: `providers.defaults.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// TCP connect timeout for upstream calls, in seconds.
    /// TOML: `providers.defaults.connect_timeout_secs`. Default: `10`.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ProviderDefaults {
    fn default() -> Self {
        Self {
            proxy: None,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// All provider configurations.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    /// Global defaults for providers (overridden per provider if set).
    #[serde(default)]
    pub defaults: ProviderDefaults,

    /// Primary provider (Gemini API).
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Secondary provider (Anthropic Messages API).
    #[serde(default)]
    pub claude: ClaudeConfig,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Base URL with a trailing `/`.
///
/// `Url::join` replaces the last path segment of a base without one.
pub(crate) fn base_url(url: &Url) -> Url {
    let mut base = url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_keeps_path_prefix_on_join() {
        let base = base_url(&Url::parse("https://gw.example/anthropic").unwrap());
        assert_eq!(
            base.join("v1/messages").unwrap().as_str(),
            "https://gw.example/anthropic/v1/messages"
        );
    }

    #[test]
    fn base_url_leaves_slashed_urls_alone() {
        let root = Url::parse("https://api.anthropic.com").unwrap();
        assert_eq!(base_url(&root).as_str(), "https://api.anthropic.com/");

        let prefixed = Url::parse("https://gw.example/google/").unwrap();
        assert_eq!(base_url(&prefixed), prefixed);
    }
}
