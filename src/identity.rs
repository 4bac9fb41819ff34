//! Canonical identifier extraction for catalog records and wishlist entries.
//!
//! Catalog APIs and the session store disagree on how ids are shaped: plain
//! strings, numbers, `{ "_id": "..." }`, `{ "id": 7 }` or Mongo extended JSON
//! (`{ "_id": { "$oid": "..." } }`). Everything funnels through [`extract_id`].

use serde_json::Value;

const MONGO_OID_KEY: &str = "$oid";
const ID_KEYS: [&str; 2] = ["_id", "id"];

/// Produce the canonical id string for a raw value, or `""` when none is derivable.
pub fn extract_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => ID_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|found| !is_blank(found))
            .map(coerce_id)
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Null and empty-string ids fall through to the next key
fn is_blank(found: &Value) -> bool {
    match found {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn coerce_id(found: &Value) -> String {
    match found {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        // Nested objects only carry an id through the `$oid` wrapper
        Value::Object(inner) => match inner.get(MONGO_OID_KEY) {
            Some(Value::String(oid)) => oid.clone(),
            Some(Value::Number(oid)) => oid.to_string(),
            _ => String::new(),
        },
        Value::Null | Value::Array(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_is_returned_unchanged() {
        assert_eq!(extract_id(&json!("abc123")), "abc123");
        assert_eq!(extract_id(&json!(" spaced ")), " spaced ");
    }

    #[test]
    fn test_underscore_id_takes_priority_over_id() {
        let record = json!({ "_id": "primary", "id": "secondary" });
        assert_eq!(extract_id(&record), "primary");
    }

    #[test]
    fn test_falls_back_to_id_field() {
        assert_eq!(extract_id(&json!({ "id": "pkg-9" })), "pkg-9");
        assert_eq!(extract_id(&json!({ "id": 42 })), "42");
        assert_eq!(extract_id(&json!({ "_id": null, "id": "x" })), "x");
        assert_eq!(extract_id(&json!({ "_id": "", "id": "x" })), "x");
        assert_eq!(extract_id(&json!({ "_id": "", "id": "" })), "");
    }

    #[test]
    fn test_unwraps_mongo_oid() {
        let record = json!({ "_id": { "$oid": "507f1f77bcf86cd799439011" } });
        assert_eq!(extract_id(&record), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_malformed_input_degrades_to_empty() {
        assert_eq!(extract_id(&Value::Null), "");
        assert_eq!(extract_id(&json!({})), "");
        assert_eq!(extract_id(&json!({ "title": "No id" })), "");
        assert_eq!(extract_id(&json!([1, 2])), "");
        assert_eq!(extract_id(&json!({ "_id": { "nested": "x" } })), "");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let record = json!({ "_id": { "$oid": "65a1" }, "title": "Kerala" });
        assert_eq!(extract_id(&record), extract_id(&record));
    }
}
