//! Wishlist reconciliation: filter catalog records down to the wishlisted
//! ones, collapse duplicates and map each survivor to a display record.

use crate::common::constants::{DEFAULT_DESTINATION, DEFAULT_DURATION, DEFAULT_TITLE};
use crate::common::types::{NormalizedWishlistItem, RawCatalogRecord};
use crate::identity::extract_id;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::debug;

// First amount in the string; prefixes like "Rs." must not leak a decimal point
static PRICE_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("valid price regex"));

/// Items plus the bookkeeping gathered while reconciling
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileOutcome {
    pub items: Vec<NormalizedWishlistItem>,
    pub duplicates_collapsed: usize,
    pub records_without_id: usize,
}

/// Reconcile wishlist ids against the fetched catalog.
///
/// Membership is an exact string match. When the same id shows up more than
/// once the later record wins, keeping the slot of the first occurrence.
pub fn reconcile<S: AsRef<str>>(
    wishlist_ids: &[S],
    catalog: &[RawCatalogRecord],
) -> Vec<NormalizedWishlistItem> {
    reconcile_with_stats(wishlist_ids, catalog).items
}

pub fn reconcile_with_stats<S: AsRef<str>>(
    wishlist_ids: &[S],
    catalog: &[RawCatalogRecord],
) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();
    if wishlist_ids.is_empty() {
        return outcome;
    }

    let wanted: HashSet<&str> = wishlist_ids.iter().map(|id| id.as_ref()).collect();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for record in catalog {
        let id = extract_id(&record.data);
        if id.is_empty() {
            outcome.records_without_id += 1;
            continue;
        }
        if !wanted.contains(id.as_str()) {
            continue;
        }

        let item = map_record(&id, record);
        match slots.get(&id) {
            Some(&slot) => {
                debug!(id = %id, source = %record.source, "Replacing duplicate wishlist item");
                outcome.items[slot] = item;
                outcome.duplicates_collapsed += 1;
            }
            None => {
                slots.insert(id, outcome.items.len());
                outcome.items.push(item);
            }
        }
    }

    outcome
}

fn map_record(id: &str, record: &RawCatalogRecord) -> NormalizedWishlistItem {
    let data = &record.data;

    let title = text_field(data, &["title", "name"]);
    let destination = text_field(data, &["destination", "location", "state"])
        .or_else(|| title.clone())
        .unwrap_or_else(|| DEFAULT_DESTINATION.to_string());

    NormalizedWishlistItem {
        id: id.to_string(),
        title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        destination,
        duration: duration_label(data.get("duration")),
        price: parse_price(data.get("price")),
        image: select_image(data),
        slug: text_field(data, &["slug"]).unwrap_or_else(|| id.to_string()),
        source: record.source,
    }
}

/// First non-empty text among `keys`; `{ "name": ... }` objects count as text.
fn text_field(data: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match data.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(inner) => match inner.get("name") {
            Some(Value::String(name)) if !name.trim().is_empty() => Some(name.clone()),
            _ => None,
        },
        _ => None,
    })
}

fn duration_label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => format!("{} Days", n),
        _ => DEFAULT_DURATION.to_string(),
    }
}

/// Numeric price from a number or a currency-formatted string, `0` otherwise.
pub fn parse_price(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => PRICE_AMOUNT
            .find(s)
            .and_then(|amount| amount.as_str().replace(',', "").parse::<f64>().ok())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

fn select_image(data: &Value) -> Option<String> {
    let from_gallery = data
        .get("images")
        .and_then(Value::as_array)
        .and_then(|images| images.first())
        .and_then(image_ref);

    from_gallery
        .or_else(|| data.get("image").and_then(image_ref))
        .or_else(|| data.get("thumbnail").and_then(image_ref))
}

fn image_ref(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(inner) => inner.get("url").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Resolve a root-relative image path against the media base URL.
pub fn resolve_image_url(media_base: &str, image: &str) -> String {
    if image.starts_with("http://") || image.starts_with("https://") || image.starts_with("data:") {
        return image.to_string();
    }
    if image.starts_with("//") {
        let scheme = media_base.split_once("://").map(|(scheme, _)| scheme).unwrap_or("https");
        return format!("{}:{}", scheme, image);
    }
    format!(
        "{}/{}",
        media_base.trim_end_matches('/'),
        image.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::SourceTag;
    use serde_json::json;

    fn records(source: SourceTag, values: Vec<Value>) -> Vec<RawCatalogRecord> {
        values
            .into_iter()
            .map(|data| RawCatalogRecord::new(source, data))
            .collect()
    }

    #[test]
    fn test_only_wishlisted_records_survive() {
        let catalog = records(SourceTag::Package, vec![json!({ "_id": "a" }), json!({ "_id": "c" })]);
        let items = reconcile(&["a", "b"], &catalog);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "a");
    }

    #[test]
    fn test_membership_is_exact_match() {
        let catalog = records(SourceTag::Package, vec![json!({ "_id": "ABC" }), json!({ "_id": "abc " })]);
        assert!(reconcile(&["abc"], &catalog).is_empty());
    }

    #[test]
    fn test_last_seen_duplicate_wins() {
        let catalog = records(
            SourceTag::Package,
            vec![
                json!({ "_id": "a", "title": "First" }),
                json!({ "_id": "b", "title": "Other" }),
                json!({ "_id": "a", "title": "Second" }),
            ],
        );
        let outcome = reconcile_with_stats(&["a", "b"], &catalog);
        assert_eq!(outcome.items.len(), 2);
        assert_eq!(outcome.items[0].title, "Second");
        assert_eq!(outcome.items[1].title, "Other");
        assert_eq!(outcome.duplicates_collapsed, 1);
    }

    #[test]
    fn test_duplicate_across_sources_takes_later_source() {
        let mut catalog = records(SourceTag::Package, vec![json!({ "_id": "x", "title": "Pkg" })]);
        catalog.extend(records(SourceTag::Adventure, vec![json!({ "_id": "x", "title": "Adv" })]));
        let items = reconcile(&["x"], &catalog);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source, SourceTag::Adventure);
        assert_eq!(items[0].route(), "/itinerary/x");
    }

    #[test]
    fn test_order_follows_catalog_not_wishlist() {
        let catalog = records(SourceTag::Holiday, vec![json!({ "_id": "b" }), json!({ "_id": "a" })]);
        let ids: Vec<String> = reconcile(&["a", "b"], &catalog).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_records_without_id_are_excluded() {
        let catalog = records(SourceTag::Package, vec![json!({ "title": "Ghost" }), json!({ "_id": "" })]);
        let outcome = reconcile_with_stats(&[""], &catalog);
        assert!(outcome.items.is_empty());
        assert_eq!(outcome.records_without_id, 2);
    }

    #[test]
    fn test_empty_wishlist_returns_nothing() {
        let catalog = records(SourceTag::Package, vec![json!({ "_id": "a" })]);
        let empty: [&str; 0] = [];
        assert!(reconcile(&empty, &catalog).is_empty());
    }

    #[test]
    fn test_destination_fallback_chain() {
        let catalog = records(
            SourceTag::Destination,
            vec![
                json!({ "_id": "1", "title": "Trip", "state": "Goa" }),
                json!({ "_id": "2", "title": "Trip", "location": "Manali", "state": "Himachal" }),
                json!({ "_id": "3", "title": "Ladakh Ride" }),
                json!({ "_id": "4" }),
                json!({ "_id": "5", "destination": { "name": "Kerala" } }),
            ],
        );
        let items = reconcile(&["1", "2", "3", "4", "5"], &catalog);
        let destinations: Vec<&str> = items.iter().map(|i| i.destination.as_str()).collect();
        assert_eq!(destinations, vec!["Goa", "Manali", "Ladakh Ride", "India", "Kerala"]);
    }

    #[test]
    fn test_title_and_duration_defaults() {
        let catalog = records(
            SourceTag::Holiday,
            vec![
                json!({ "_id": "1", "name": "Beach Holidays", "duration": 5 }),
                json!({ "_id": "2", "duration": "" }),
            ],
        );
        let items = reconcile(&["1", "2"], &catalog);
        assert_eq!(items[0].title, "Beach Holidays");
        assert_eq!(items[0].duration, "5 Days");
        assert_eq!(items[1].title, DEFAULT_TITLE);
        assert_eq!(items[1].duration, DEFAULT_DURATION);
    }

    #[test]
    fn test_price_parsing() {
        assert_eq!(parse_price(Some(&json!("₹12,345"))), 12345.0);
        assert_eq!(parse_price(Some(&json!(5000))), 5000.0);
        assert_eq!(parse_price(Some(&json!("INR 1,999.50"))), 1999.5);
        assert_eq!(parse_price(Some(&json!("Rs.12,345"))), 12345.0);
        assert_eq!(parse_price(Some(&json!("Rs. 5,000/-"))), 5000.0);
        assert_eq!(parse_price(Some(&json!("on request"))), 0.0);
        assert_eq!(parse_price(Some(&Value::Null)), 0.0);
        assert_eq!(parse_price(None), 0.0);
    }

    #[test]
    fn test_image_selection_and_slug_fallback() {
        let catalog = records(
            SourceTag::FixedDeparture,
            vec![
                json!({ "_id": "1", "images": ["/a.jpg", "/b.jpg"], "image": "/c.jpg", "slug": "spiti" }),
                json!({ "_id": "2", "images": [], "thumbnail": "/t.jpg" }),
                json!({ "_id": "3", "images": [{ "url": "https://cdn/x.jpg" }] }),
                json!({ "_id": "4" }),
            ],
        );
        let items = reconcile(&["1", "2", "3", "4"], &catalog);
        assert_eq!(items[0].image.as_deref(), Some("/a.jpg"));
        assert_eq!(items[0].route(), "/fixed-departures/spiti");
        assert_eq!(items[1].image.as_deref(), Some("/t.jpg"));
        assert_eq!(items[1].slug, "2");
        assert_eq!(items[2].image.as_deref(), Some("https://cdn/x.jpg"));
        assert_eq!(items[3].image, None);
    }

    #[test]
    fn test_resolve_image_url() {
        assert_eq!(
            resolve_image_url("https://api.example.com/", "/uploads/a.jpg"),
            "https://api.example.com/uploads/a.jpg"
        );
        assert_eq!(
            resolve_image_url("https://api.example.com", "https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
        assert_eq!(
            resolve_image_url("https://api.example.com", "//cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
        assert_eq!(
            resolve_image_url("http://localhost:5000", "//cdn.example.com/a.jpg"),
            "http://cdn.example.com/a.jpg"
        );
    }
}
