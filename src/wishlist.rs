use crate::common::error::Result;
use crate::identity::extract_id;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Canonical wishlist ids as held by the session.
///
/// Entries are canonicalised on the way in, so the collection never holds an
/// empty id or the same id twice. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishlistIds {
    ids: Vec<String>,
}

impl WishlistIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw session entries: strings, `$oid` wrappers or whole records.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut wishlist = Self::new();
        for entry in entries {
            let id = match entry {
                Value::Number(n) => n.to_string(),
                other => extract_id(other),
            };
            wishlist.push(id);
        }
        wishlist
    }

    /// Parse a comma-separated list such as `a,b , c`.
    pub fn from_csv(list: &str) -> Self {
        let mut wishlist = Self::new();
        for id in list.split(',') {
            wishlist.push(id.trim().to_string());
        }
        wishlist
    }

    /// Load a session export: either a bare array or `{ "wishlist": [...] }`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;

        let entries: &[Value] = match &value {
            Value::Array(items) => items.as_slice(),
            Value::Object(map) => map
                .get("wishlist")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            _ => &[],
        };

        let wishlist = Self::from_entries(entries);
        info!(path = %path.display(), count = wishlist.len(), "Loaded wishlist");
        Ok(wishlist)
    }

    fn push(&mut self, id: String) {
        if id.is_empty() {
            debug!("Dropping wishlist entry without a usable id");
            return;
        }
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_entries_are_canonicalised_and_deduplicated() {
        let entries = vec![
            json!("a"),
            json!({ "$oid": "ignored-without-id-key" }),
            json!({ "_id": { "$oid": "507f1f77bcf86cd799439011" } }),
            json!({ "id": "a" }),
            json!(17),
            json!(null),
            json!(""),
        ];
        let wishlist = WishlistIds::from_entries(&entries);
        assert_eq!(
            wishlist.as_slice(),
            &["a".to_string(), "507f1f77bcf86cd799439011".to_string(), "17".to_string()]
        );
    }

    #[test]
    fn test_from_csv_trims_and_skips_blanks() {
        let wishlist = WishlistIds::from_csv(" a, b,,a ,c ");
        assert_eq!(wishlist.len(), 3);
        assert!(wishlist.contains("b"));
        assert!(!wishlist.contains(" b"));
    }

    #[test]
    fn test_load_from_file_accepts_wrapped_export() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "wishlist": ["x", {{ "_id": "y" }}] }}"#).unwrap();

        let wishlist = WishlistIds::load_from_file(file.path()).unwrap();
        assert_eq!(wishlist.as_slice(), &["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(WishlistIds::load_from_file(file.path()).is_err());
    }
}
