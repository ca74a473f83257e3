use crate::config::Config;
use crate::providers::claude::ClaudeProvider;
use crate::providers::gemini::GeminiProvider;
use crate::providers::{ProviderKind, TextProvider};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Lookup table from provider kind to its client.
///
/// Adding a provider means one new `ProviderKind` variant and one `register` call.
#[derive(Clone, Default)]
pub struct Providers {
    table: BTreeMap<ProviderKind, Arc<dyn TextProvider>>,
}

impl Providers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every built-in provider from the resolved configuration.
    pub fn from_config(cfg: &Config) -> Self {
        let gemini_cfg = Arc::new(cfg.gemini());
        let claude_cfg = Arc::new(cfg.claude());

        // Log resolved provider configs here so `main` stays wiring-only.
        info!(
            gemini_api_url = %gemini_cfg.api_url,
            gemini_model = %gemini_cfg.model,
            gemini_proxy = %gemini_cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
            gemini_key_present = gemini_cfg.api_key.is_some(),
            "Gemini config (effective)"
        );
        info!(
            claude_api_url = %claude_cfg.api_url,
            claude_model = %claude_cfg.model,
            claude_max_tokens = claude_cfg.max_tokens,
            claude_proxy = %claude_cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
            claude_key_present = claude_cfg.api_key.is_some(),
            "Claude config (effective)"
        );

        let providers = Self::new()
            .register(Arc::new(GeminiProvider::new(gemini_cfg)))
            .register(Arc::new(ClaudeProvider::new(claude_cfg)));
        info!(
            providers = ?providers.kinds().collect::<Vec<_>>(),
            primary = %ProviderKind::PRIMARY,
            "Providers registered"
        );
        providers
    }

    /// Insert `provider` under its own kind, replacing any previous entry.
    #[must_use]
    pub fn register(mut self, provider: Arc<dyn TextProvider>) -> Self {
        self.table.insert(provider.kind(), provider);
        self
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&Arc<dyn TextProvider>> {
        self.table.get(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = ProviderKind> + '_ {
        self.table.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_registers_both_providers() {
        let providers = Providers::from_config(&Config::default());
        assert_eq!(
            providers.kinds().collect::<Vec<_>>(),
            vec![ProviderKind::Gemini, ProviderKind::Claude]
        );
        assert!(providers.get(ProviderKind::PRIMARY).is_some());
    }
}
