use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Scope requested for brokered storage tokens.
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Cloud storage settings published via `GET /config` and used by the token broker.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// TOML: `storage.project_id`. Env: `GCP_PROJECT_ID`. Default: `veopromptmachine`.
    #[serde(default = "default_project_id")]
    pub project_id: String,

    /// TOML: `storage.bucket_name`. Env: `GCP_BUCKET`. Default: `veo-prompt-machine`.
    #[serde(default = "default_bucket_name")]
    pub bucket_name: String,

    /// Service-account JSON key file.
    /// TOML: `storage.credentials_path`. Env: `GOOGLE_APPLICATION_CREDENTIALS`.
    /// Default: `service-account.json`.
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    /// OAuth scope of brokered tokens.
    /// TOML: `storage.token_scope`. Default: cloud-platform.
    #[serde(default = "default_token_scope")]
    pub token_scope: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            project_id: default_project_id(),
            bucket_name: default_bucket_name(),
            credentials_path: default_credentials_path(),
            token_scope: default_token_scope(),
        }
    }
}

fn default_project_id() -> String {
    "veopromptmachine".to_string()
}

fn default_bucket_name() -> String {
    "veo-prompt-machine".to_string()
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("service-account.json")
}

fn default_token_scope() -> String {
    CLOUD_PLATFORM_SCOPE.to_string()
}
