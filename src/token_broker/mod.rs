//! Short-lived storage tokens minted from a stored service-account key.

mod credentials;
mod endpoints;

pub use credentials::ServiceAccountKey;
pub use endpoints::JWT_BEARER_GRANT;

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::config::{ProviderDefaults, StorageConfig};
use crate::error::{RelayError, TokenError};
use crate::providers::upstream::build_client;
use endpoints::ServiceAccountEndpoints;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Produces a fresh bearer token for the storage scope.
#[async_trait]
pub trait TokenBroker: Send + Sync {
    async fn access_token(&self) -> Result<String, RelayError>;
}

/// JWT-bearer exchange using the service-account key file on disk.
///
/// The key file is re-read on every call, so rotating it needs no restart.
pub struct ServiceAccountBroker {
    credentials_path: PathBuf,
    scope: String,
    proxy: Option<Url>,
    connect_timeout: Duration,
}

impl ServiceAccountBroker {
    pub fn new(credentials_path: impl Into<PathBuf>, scope: impl Into<String>) -> Self {
        Self {
            credentials_path: credentials_path.into(),
            scope: scope.into(),
            proxy: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Route the token exchange through `proxy` with the given connect timeout.
    #[must_use]
    pub fn with_transport(mut self, proxy: Option<Url>, connect_timeout: Duration) -> Self {
        self.proxy = proxy;
        self.connect_timeout = connect_timeout;
        self
    }

    /// Storage settings plus the shared provider transport defaults.
    pub fn from_config(storage: &StorageConfig, defaults: &ProviderDefaults) -> Self {
        Self::new(storage.credentials_path.clone(), storage.token_scope.clone()).with_transport(
            defaults.proxy.clone(),
            Duration::from_secs(defaults.connect_timeout_secs),
        )
    }

    async fn mint(&self) -> Result<String, TokenError> {
        let key = ServiceAccountKey::load(&self.credentials_path).await?;
        let assertion = ServiceAccountEndpoints::sign_assertion(&key, &self.scope)?;
        let http_client = build_client(self.proxy.as_ref(), self.connect_timeout)?;
        ServiceAccountEndpoints::exchange_assertion(&key, &assertion, &http_client).await
    }
}

#[async_trait]
impl TokenBroker for ServiceAccountBroker {
    async fn access_token(&self) -> Result<String, RelayError> {
        Ok(self.mint().await?)
    }
}
