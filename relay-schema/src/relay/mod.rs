//! Request and response bodies of the relay's own HTTP endpoints.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// `model_type` exactly as the caller sent it.
///
/// A missing key differs from any present value, `null` and non-strings included.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModelType {
    #[default]
    Missing,
    Given(Value),
}

impl ModelType {
    pub fn is_missing(&self) -> bool {
        matches!(self, ModelType::Missing)
    }

    /// The value when it is a JSON string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ModelType::Given(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for ModelType {
    fn from(value: &str) -> Self {
        ModelType::Given(Value::String(value.to_string()))
    }
}

impl Serialize for ModelType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ModelType::Missing => serializer.serialize_none(),
            ModelType::Given(value) => value.serialize(serializer),
        }
    }
}

// Only reached when the key is present; `#[serde(default)]` covers the missing case.
impl<'de> Deserialize<'de> for ModelType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(ModelType::Given)
    }
}

/// `POST /analyze` body.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuditRequest {
    /// Missing or `"gemini"` selects the primary provider; anything else the secondary.
    #[serde(default, skip_serializing_if = "ModelType::is_missing")]
    pub model_type: ModelType,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub chat_log: Option<String>,
}

/// `POST /narrative` body.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NarrativeRequest {
    #[serde(default, skip_serializing_if = "ModelType::is_missing")]
    pub model_type: ModelType,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextResponse {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigResponse {
    pub project_id: String,
    pub bucket_name: String,
}

/// Failure body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub detail: String,
}
