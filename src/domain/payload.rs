//! JSON payload parsing and rendering
//!
//! Numbers keep their source spelling (`arbitrary_precision`), so payloads
//! reach the server digit for digit.

use serde_json::Value;

use crate::domain::DomainError;

/// Parse user-supplied JSON; `origin` names the source in error messages.
pub fn parse_json(text: &str, origin: &str) -> Result<Value, DomainError> {
    serde_json::from_str(text).map_err(|source| DomainError::InvalidJson {
        origin: origin.to_string(),
        source,
    })
}

/// Pretty-print with two-space indentation, keeping key order.
///
/// Characters outside printable ASCII are written as `\uXXXX` escapes
/// (UTF-16 surrogate pairs above the BMP).
pub fn render_json(value: &Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    escape_non_ascii(&pretty)
}

// Serialized JSON only carries such characters inside string literals,
// so escaping the whole document is equivalent to escaping each string.
fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for c in json.chars() {
        if c < '\u{7f}' {
            out.push(c);
            continue;
        }
        for unit in c.encode_utf16(&mut units).iter() {
            out.push_str(&format!("\\u{unit:04x}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_nested_object_when_rendering_then_indents_two_spaces() {
        let value = json!({"id": "1", "nodes": [{"type": "webhook"}]});
        let expected = "{\n  \"id\": \"1\",\n  \"nodes\": [\n    {\n      \"type\": \"webhook\"\n    }\n  ]\n}";
        assert_eq!(render_json(&value), expected);
    }

    #[test]
    fn given_unsorted_keys_when_round_tripping_then_order_is_kept() {
        let value = parse_json(r#"{"zeta":1,"alpha":2}"#, "test").unwrap();
        assert_eq!(render_json(&value), "{\n  \"zeta\": 1,\n  \"alpha\": 2\n}");
    }

    #[test]
    fn given_invalid_json_when_parsing_then_names_origin() {
        let err = parse_json("{not json", "--data").unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON in --data:"));
    }

    #[test]
    fn given_integers_beyond_64_bits_when_round_tripping_then_digits_are_kept() {
        let text = r#"{"n":123456789012345678901234567890,"neg":-9223372036854775809}"#;

        let value = parse_json(text, "file").unwrap();

        assert_eq!(serde_json::to_string(&value).unwrap(), text);
    }

    #[test]
    fn given_numbers_beyond_f64_range_when_parsing_then_accepted_verbatim() {
        let text = r#"{"f":1e400,"x":1e20,"pi":3.14159265358979323846264338327950288}"#;

        let value = parse_json(text, "file").unwrap();

        assert_eq!(serde_json::to_string(&value).unwrap(), text);
        assert_eq!(
            render_json(&value),
            "{\n  \"f\": 1e400,\n  \"x\": 1e20,\n  \"pi\": 3.14159265358979323846264338327950288\n}"
        );
    }

    #[test]
    fn given_non_ascii_text_when_rendering_then_escapes_as_utf16() {
        let value = json!({"name": "Grüße", "emoji": "🚀", "del": "\u{7f}", "tab": "\t"});

        assert_eq!(
            render_json(&value),
            "{\n  \"name\": \"Gr\\u00fc\\u00dfe\",\n  \"emoji\": \"\\ud83d\\ude80\",\n  \"del\": \"\\u007f\",\n  \"tab\": \"\\t\"\n}"
        );
    }

    #[test]
    fn given_non_ascii_key_when_rendering_then_key_is_escaped_too() {
        let value = json!({"ключ": 1});
        assert_eq!(
            render_json(&value),
            "{\n  \"\\u043a\\u043b\\u044e\\u0447\": 1\n}"
        );
    }
}
