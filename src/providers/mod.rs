pub mod claude;
pub mod gemini;

mod bootstrap;
mod dispatcher;
mod manifest;
mod policy;
pub(crate) mod upstream;

pub use bootstrap::Providers;
pub use dispatcher::Dispatcher;
pub use manifest::{
    AUDIT_FRAME, GenerationRequest, GenerationResult, Operation, PRIMARY_MODEL_TYPE,
    ProviderKind, ResponseFormat,
};

use crate::error::RelayError;
use async_trait::async_trait;

/// One model family's "produce text" capability.
///
/// Implementations build their transport per call and keep no state between calls.
#[async_trait]
pub trait TextProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, RelayError>;
}
