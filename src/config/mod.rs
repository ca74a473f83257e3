mod basic;
mod providers;
mod storage;

pub use basic::BasicConfig;
pub use providers::{
    ClaudeConfig, ClaudeResolvedConfig, GeminiConfig, GeminiResolvedConfig, ProviderDefaults,
    ProvidersConfig,
};
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Application configuration managed by Figment.
///
/// Built once at startup and handed to the server state behind an `Arc`;
/// nothing reads configuration from ambient globals.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Model provider settings (see `providers` table in config.toml).
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Cloud storage settings published to the client (see `storage` table).
    #[serde(default)]
    pub storage: StorageConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for nested overrides, e.g. `RELAY_BASIC__LISTEN_PORT=9000`.
const ENV_PREFIX: &str = "RELAY_";

/// Flat environment names used by existing deployments, mapped onto config keys.
const ENV_ALIASES: &[(&str, &str)] = &[
    ("GCP_PROJECT_ID", "storage.project_id"),
    ("GCP_BUCKET", "storage.bucket_name"),
    ("GOOGLE_APPLICATION_CREDENTIALS", "storage.credentials_path"),
    ("GEMINI_API_KEY", "providers.gemini.api_key"),
    ("ANTHROPIC_API_KEY", "providers.claude.api_key"),
    ("LOGLEVEL", "basic.loglevel"),
];

impl Config {
    /// Builds a Figment that merges defaults, `config.toml` (if present) and the environment.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        };
        figment
            .merge(env_aliases())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration.
    ///
    /// Missing API keys or credential files are not an error here: the relay keeps
    /// serving and fails only the operations that need the absent value.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn gemini(&self) -> GeminiResolvedConfig {
        self.providers.gemini.resolve(&self.providers.defaults)
    }

    pub fn claude(&self) -> ClaudeResolvedConfig {
        self.providers.claude.resolve(&self.providers.defaults)
    }
}

fn env_aliases() -> Env {
    let keys: Vec<&str> = ENV_ALIASES.iter().map(|(env, _)| *env).collect();
    Env::raw().only(&keys).map(|key| {
        ENV_ALIASES
            .iter()
            .find(|(env, _)| key.as_str().eq_ignore_ascii_case(env))
            .map_or_else(|| key.into(), |(_, path)| (*path).into())
    })
}

/// Accepts a string or a number; empty or whitespace-only strings become `None`.
///
/// Env values are type-inferred by Figment, so an all-digit key would otherwise
/// fail to deserialize as a string.
pub(crate) fn deserialize_secret_lax<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;

    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s).filter(|s| !s.trim().is_empty())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(serde::de::Error::custom(
            "expected a string or a number for an API key",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_match_deployment_values() {
        Jail::expect_with(|_jail| {
            let cfg = Config::load()?;
            assert_eq!(cfg.basic.listen_port, 8005);
            assert_eq!(cfg.storage.project_id, "veopromptmachine");
            assert_eq!(cfg.storage.bucket_name, "veo-prompt-machine");
            assert!(cfg.providers.gemini.api_key.is_none());
            assert!(cfg.providers.claude.api_key.is_none());
            Ok(())
        });
    }

    #[test]
    fn flat_env_names_are_mapped() {
        Jail::expect_with(|jail| {
            jail.set_env("GCP_PROJECT_ID", "proj-1");
            jail.set_env("GCP_BUCKET", "bucket-1");
            jail.set_env("GEMINI_API_KEY", "g-key");
            jail.set_env("ANTHROPIC_API_KEY", "12345");
            jail.set_env("GOOGLE_APPLICATION_CREDENTIALS", "/etc/sa.json");

            let cfg = Config::load()?;
            assert_eq!(cfg.storage.project_id, "proj-1");
            assert_eq!(cfg.storage.bucket_name, "bucket-1");
            assert_eq!(cfg.providers.gemini.api_key.as_deref(), Some("g-key"));
            assert_eq!(cfg.providers.claude.api_key.as_deref(), Some("12345"));
            assert_eq!(
                cfg.storage.credentials_path,
                PathBuf::from("/etc/sa.json")
            );
            Ok(())
        });
    }

    #[test]
    fn empty_key_counts_as_missing() {
        Jail::expect_with(|jail| {
            jail.set_env("GEMINI_API_KEY", "");
            let cfg = Config::load()?;
            assert!(cfg.gemini().api_key.is_none());
            Ok(())
        });
    }

    #[test]
    fn toml_then_prefixed_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [basic]
                listen_port = 9000

                [providers.defaults]
                proxy = "http://127.0.0.1:1080"

                [providers.claude]
                model = "claude-from-toml"
                "#,
            )?;
            jail.set_env("RELAY_BASIC__LISTEN_PORT", "9100");

            let cfg = Config::load()?;
            assert_eq!(cfg.basic.listen_port, 9100);
            assert_eq!(cfg.claude().model, "claude-from-toml");
            assert_eq!(
                cfg.claude().proxy.as_ref().map(url::Url::as_str),
                Some("http://127.0.0.1:1080/")
            );
            Ok(())
        });
    }
}
