//! Chat-completion response handling.
//!
//! Models are prompted to answer with a single JSON object, but in
//! practice the object arrives wrapped in markdown fences, prefixed with
//! prose, or occasionally truncated. Extraction takes the widest brace
//! window and lets the parser decide.

use serde_json::Value;

/// Pull the assistant message text out of a chat-completion response body
/// (`choices[0].message.content`).
#[must_use]
pub fn message_content(body: &Value) -> Option<&str> {
    body.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}

/// Extract the JSON object embedded in free-form response text.
///
/// Slices from the first `{` to the last `}` and parses the window;
/// anything around it (fences, prose) is ignored. Returns `None` when no
/// parseable object is present.
#[must_use]
pub fn extract_json(content: &str) -> Option<Value> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&content[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn message_content_reads_first_choice() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"score\": 1}"}}],
            "usage": {"total_tokens": 320},
        });
        assert_eq!(message_content(&body), Some("{\"score\": 1}"));
    }

    #[test]
    fn message_content_absent_on_odd_shapes() {
        assert_eq!(message_content(&json!({})), None);
        assert_eq!(message_content(&json!({"choices": []})), None);
        assert_eq!(
            message_content(&json!({"choices": [{"message": {"content": 42}}]})),
            None
        );
    }

    #[test]
    fn extract_json_plain_object() {
        let v = extract_json(r#"{"score": 42}"#).unwrap();
        assert_eq!(v["score"], 42);
    }

    #[test]
    fn extract_json_strips_fences_and_prose() {
        let content = "Ось аналіз:\n```json\n{\"score\": 7}\n```\nДякую!";
        let v = extract_json(content).unwrap();
        assert_eq!(v["score"], 7);
    }

    #[test]
    fn extract_json_handles_nested_braces() {
        let content = "prefix {\"a\": {\"b\": [1, 2]}} suffix";
        let v = extract_json(content).unwrap();
        assert_eq!(v["a"]["b"][1], 2);
    }

    #[test]
    fn extract_json_rejects_garbage() {
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json("{truncated"), None);
        assert_eq!(extract_json("} backwards {"), None);
        assert_eq!(extract_json(""), None);
    }
}
