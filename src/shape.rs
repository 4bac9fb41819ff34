use crate::common::constants::PAYLOAD_ARRAY_KEYS;
use crate::common::types::{RawCatalogRecord, SourceTag};
use serde_json::Value;
use tracing::debug;

/// Flatten an endpoint payload into tagged records.
///
/// Endpoints answer either with a bare array or with an object wrapping the
/// array under one of [`PAYLOAD_ARRAY_KEYS`]. Anything else yields no records.
pub fn normalize(payload: &Value, source: SourceTag) -> Vec<RawCatalogRecord> {
    let records = match payload {
        Value::Array(items) => Some(items),
        Value::Object(map) => PAYLOAD_ARRAY_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array)),
        _ => None,
    };

    match records {
        Some(items) => items
            .iter()
            .cloned()
            .map(|data| RawCatalogRecord::new(source, data))
            .collect(),
        None => {
            debug!(source = %source, "Payload carried no record array");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array_is_tagged() {
        let records = normalize(&json!([1, 2, 3]), SourceTag::Package);
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.source == SourceTag::Package));
        assert_eq!(records[2].data, json!(3));
    }

    #[test]
    fn test_wrapped_array_is_unwrapped_and_tagged() {
        let records = normalize(&json!({ "packages": [{ "a": 1 }] }), SourceTag::Holiday);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].to_tagged_json(),
            json!({ "a": 1, "sourceTag": "holiday" })
        );
    }

    #[test]
    fn test_data_key_wins_over_later_keys() {
        let payload = json!({
            "destinations": [{ "_id": "d1" }, { "_id": "d2" }],
            "data": [{ "_id": "x" }]
        });
        let records = normalize(&payload, SourceTag::Destination);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data, json!({ "_id": "x" }));
    }

    #[test]
    fn test_non_array_wrapper_is_skipped() {
        let payload = json!({ "data": { "count": 2 }, "fixedDepartures": [{ "_id": "f1" }] });
        let records = normalize(&payload, SourceTag::FixedDeparture);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_unrecognised_payloads_yield_nothing() {
        assert!(normalize(&json!({}), SourceTag::Adventure).is_empty());
        assert!(normalize(&Value::Null, SourceTag::Adventure).is_empty());
        assert!(normalize(&json!("oops"), SourceTag::Adventure).is_empty());
        assert!(normalize(&json!({ "items": [1] }), SourceTag::Adventure).is_empty());
    }
}
