use serde::Serialize;

/// Characters of an upstream body kept when it is echoed into logs or error details.
pub const BODY_PREVIEW_CHARS: usize = 300;

/// Run `log_action` with `value` as pretty JSON, only when DEBUG is enabled.
pub(crate) fn with_pretty_json_debug<T, F>(value: &T, log_action: F)
where
    T: Serialize,
    F: FnOnce(&str),
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let pretty_json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>"));
    log_action(pretty_json.as_str());
}

/// Lossy UTF-8 view of `bytes`, cut to `BODY_PREVIEW_CHARS` characters.
pub(crate) fn body_preview(bytes: &[u8]) -> String {
    let raw_body = String::from_utf8_lossy(bytes);
    format!("{:.len$}", raw_body, len = BODY_PREVIEW_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_by_characters() {
        let body = "é".repeat(BODY_PREVIEW_CHARS + 10);
        assert_eq!(body_preview(body.as_bytes()).chars().count(), BODY_PREVIEW_CHARS);
    }

    #[test]
    fn short_body_is_kept_whole() {
        assert_eq!(body_preview(b"bad gateway"), "bad gateway");
    }
}
