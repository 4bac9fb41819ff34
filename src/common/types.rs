use crate::common::constants::{
    ADVENTURE_SOURCE, DESTINATION_SOURCE, FIXED_DEPARTURE_SOURCE, HOLIDAY_SOURCE, PACKAGE_SOURCE,
    SOURCE_TAG_FIELD,
};
use crate::common::error::WishlistError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Catalog category a record was fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceTag {
    Package,
    Holiday,
    Destination,
    FixedDeparture,
    Adventure,
}

impl SourceTag {
    /// Fixed fetch and concatenation order of the catalog sources
    pub const ALL: [SourceTag; 5] = [
        SourceTag::Package,
        SourceTag::Holiday,
        SourceTag::Destination,
        SourceTag::FixedDeparture,
        SourceTag::Adventure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Package => PACKAGE_SOURCE,
            SourceTag::Holiday => HOLIDAY_SOURCE,
            SourceTag::Destination => DESTINATION_SOURCE,
            SourceTag::FixedDeparture => FIXED_DEPARTURE_SOURCE,
            SourceTag::Adventure => ADVENTURE_SOURCE,
        }
    }

    /// Detail page route for an item of this category
    pub fn detail_route(&self, slug: &str) -> String {
        match self {
            SourceTag::Package | SourceTag::Adventure => format!("/itinerary/{}", slug),
            SourceTag::Destination => format!("/destinations/{}", slug),
            SourceTag::FixedDeparture => format!("/fixed-departures/{}", slug),
            SourceTag::Holiday => format!("/holiday-types/{}", slug),
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceTag {
    type Err = WishlistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s.trim())
            .ok_or_else(|| WishlistError::UnknownSource(s.to_string()))
    }
}

/// A loosely-typed record as returned by one catalog endpoint, tagged with its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCatalogRecord {
    pub source: SourceTag,
    pub data: Value,
}

impl RawCatalogRecord {
    pub fn new(source: SourceTag, data: Value) -> Self {
        Self { source, data }
    }

    /// Record rendered back to JSON with the source tag annotated on object records
    pub fn to_tagged_json(&self) -> Value {
        match &self.data {
            Value::Object(map) => {
                let mut map = map.clone();
                map.insert(
                    SOURCE_TAG_FIELD.to_string(),
                    Value::String(self.source.as_str().to_string()),
                );
                Value::Object(map)
            }
            other => other.clone(),
        }
    }
}

/// Uniform display record for one wishlisted catalog entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWishlistItem {
    pub id: String,
    pub title: String,
    pub destination: String,
    pub duration: String,
    pub price: f64,
    pub image: Option<String>,
    pub slug: String,
    pub source: SourceTag,
}

impl NormalizedWishlistItem {
    pub fn route(&self) -> String {
        self.source.detail_route(&self.slug)
    }
}
