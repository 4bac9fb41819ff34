use crate::app::ports::HttpClientPort;
use crate::common::types::{RawCatalogRecord, SourceTag};
use crate::config::ApiConfig;
use crate::observability::metrics;
use crate::shape::normalize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Fetches the five catalog sources concurrently and flattens them into tagged records.
pub struct CatalogFetcher {
    http: Arc<dyn HttpClientPort>,
    api: ApiConfig,
}

impl CatalogFetcher {
    pub fn new(http: Arc<dyn HttpClientPort>, api: ApiConfig) -> Self {
        Self { http, api }
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    /// All sources, concatenated in [`SourceTag::ALL`] order whatever order they resolve in.
    #[instrument(skip(self))]
    pub async fn fetch_all_catalogs(&self) -> Vec<RawCatalogRecord> {
        let (packages, holidays, destinations, fixed_departures, adventures) = tokio::join!(
            self.fetch_payload(SourceTag::Package),
            self.fetch_payload(SourceTag::Holiday),
            self.fetch_payload(SourceTag::Destination),
            self.fetch_payload(SourceTag::FixedDeparture),
            self.fetch_payload(SourceTag::Adventure),
        );

        let payloads = [
            (SourceTag::Package, packages),
            (SourceTag::Holiday, holidays),
            (SourceTag::Destination, destinations),
            (SourceTag::FixedDeparture, fixed_departures),
            (SourceTag::Adventure, adventures),
        ];

        let mut catalog = Vec::new();
        for (source, payload) in &payloads {
            catalog.extend(self.normalize_payload(payload, *source));
        }

        info!("Fetched {} catalog records", catalog.len());
        catalog
    }

    /// A single source, with the same failure tolerance as the full fetch.
    #[instrument(skip(self))]
    pub async fn fetch_source(&self, source: SourceTag) -> Vec<RawCatalogRecord> {
        let payload = self.fetch_payload(source).await;
        self.normalize_payload(&payload, source)
    }

    fn normalize_payload(&self, payload: &Value, source: SourceTag) -> Vec<RawCatalogRecord> {
        let records = normalize(payload, source);
        debug!(source = %source, count = records.len(), "Normalized catalog payload");
        metrics::catalog::records_normalized(source, records.len());
        records
    }

    /// Any failure degrades to an empty object so the other sources still count.
    async fn fetch_payload(&self, source: SourceTag) -> Value {
        let url = self.api.endpoint_url(source);
        match self.http.get_json(&url).await {
            Ok(payload) => {
                metrics::catalog::request_succeeded(source);
                payload
            }
            Err(e) => {
                warn!(source = %source, url = %url, "Catalog source unavailable: {}", e);
                metrics::catalog::request_failed(source);
                Value::Object(Map::new())
            }
        }
    }
}
