//! Validation of raw model output
//!
//! Models are asked for bare JSON but often wrap it in prose or markdown fences.
//! We accept the whole text when it parses, otherwise the span from the first `{`
//! to the last `}`.

use serde_json::Map;
use serde_json::Value;

use crate::errors::ResponseParseError;

/// Extract the JSON object a model was asked to produce
pub fn extract_json_object(content: &str) -> Result<Map<String, Value>, ResponseParseError> {
    let trimmed = content.trim();

    let value = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => value,
        Err(whole_err) => {
            let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) else {
                return Err(ResponseParseError::NoJson);
            };
            if end < start {
                return Err(ResponseParseError::NoJson);
            }
            serde_json::from_str::<Value>(&trimmed[start..=end]).map_err(|_| {
                ResponseParseError::InvalidJson(whole_err.to_string())
            })?
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ResponseParseError::NoJson),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_object() {
        let map = extract_json_object(r#"{"score": 80, "reason": "fits"}"#).unwrap();
        assert_eq!(map["score"], 80);
    }

    #[test]
    fn test_object_in_markdown_fence() {
        let input = "```json\n{\"score\": 42, \"reason\": \"ok\"}\n```";
        let map = extract_json_object(input).unwrap();
        assert_eq!(map["score"], 42);
    }

    #[test]
    fn test_object_surrounded_by_prose() {
        let input = "Sure! Here it is: {\"semantic_query\": \"loft\", \"filters\": {}} Hope this helps.";
        let map = extract_json_object(input).unwrap();
        assert_eq!(map["semantic_query"], "loft");
    }

    #[test]
    fn test_plain_text_has_no_json() {
        assert_eq!(
            extract_json_object("I cannot help with that."),
            Err(ResponseParseError::NoJson)
        );
    }

    #[test]
    fn test_array_is_not_an_object() {
        assert_eq!(extract_json_object("[1, 2]"), Err(ResponseParseError::NoJson));
    }

    #[test]
    fn test_truncated_object_is_invalid() {
        let result = extract_json_object("{\"score\": 10, \"reason\": \"cut off");
        assert!(matches!(result, Err(ResponseParseError::NoJson)));

        let result = extract_json_object("{\"score\": 10,, }");
        assert!(matches!(result, Err(ResponseParseError::InvalidJson(_))));
    }
}
