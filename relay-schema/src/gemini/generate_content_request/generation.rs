use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const JSON_MIME_TYPE: &str = "application/json";

/// `generationConfig` object.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Output MIME type; `application/json` asks for structured output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,

    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl GenerationConfig {
    pub fn json_output() -> Self {
        Self {
            response_mime_type: Some(JSON_MIME_TYPE.to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_output_sets_mime_type_only() {
        assert_eq!(
            serde_json::to_value(GenerationConfig::json_output()).unwrap(),
            json!({"responseMimeType": "application/json"})
        );
    }
}
