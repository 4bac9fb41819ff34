//! Counters for the catalog fetch and wishlist reconciliation phases.
//!
//! Recording is a no-op until [`init`] installs the Prometheus recorder, so
//! library callers and tests never need to set anything up.

use std::fmt;
use std::sync::OnceLock;
use tracing::info;

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Catalog metrics
    CatalogRequestsSuccess,
    CatalogRequestsError,
    CatalogRecordsNormalized,

    // Wishlist metrics
    WishlistReconciliations,
    WishlistItemsReconciled,
    WishlistDuplicatesCollapsed,
    WishlistRecordsWithoutId,
    WishlistShortCircuits,
    WishlistStaleDiscarded,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::CatalogRequestsSuccess => "wishlist_catalog_requests_success_total",
            MetricName::CatalogRequestsError => "wishlist_catalog_requests_error_total",
            MetricName::CatalogRecordsNormalized => "wishlist_catalog_records_normalized_total",
            MetricName::WishlistReconciliations => "wishlist_reconciliations_total",
            MetricName::WishlistItemsReconciled => "wishlist_items_reconciled_total",
            MetricName::WishlistDuplicatesCollapsed => "wishlist_duplicates_collapsed_total",
            MetricName::WishlistRecordsWithoutId => "wishlist_records_without_id_total",
            MetricName::WishlistShortCircuits => "wishlist_short_circuits_total",
            MetricName::WishlistStaleDiscarded => "wishlist_stale_results_discarded_total",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            CatalogRequestsSuccess,
            CatalogRequestsError,
            CatalogRecordsNormalized,
            WishlistReconciliations,
            WishlistItemsReconciled,
            WishlistDuplicatesCollapsed,
            WishlistRecordsWithoutId,
            WishlistShortCircuits,
            WishlistStaleDiscarded,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static METRICS_HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Calling it twice is an error from the exporter.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {}", e))?;
    METRICS_HANDLE.set(handle).ok();
    info!("Metrics system initialized");
    Ok(())
}

/// Prometheus text exposition, if the recorder is installed
pub fn render() -> Option<String> {
    METRICS_HANDLE.get().map(|handle| handle.render())
}

pub mod catalog {
    use super::MetricName;
    use crate::common::types::SourceTag;

    pub fn request_succeeded(source: SourceTag) {
        ::metrics::counter!(MetricName::CatalogRequestsSuccess.as_str(), "source" => source.as_str())
            .increment(1);
    }

    pub fn request_failed(source: SourceTag) {
        ::metrics::counter!(MetricName::CatalogRequestsError.as_str(), "source" => source.as_str())
            .increment(1);
    }

    pub fn records_normalized(source: SourceTag, count: usize) {
        ::metrics::counter!(MetricName::CatalogRecordsNormalized.as_str(), "source" => source.as_str())
            .increment(count as u64);
    }
}

pub mod wishlist {
    use super::MetricName;

    pub fn reconciled(items: usize, duplicates: usize, without_id: usize) {
        ::metrics::counter!(MetricName::WishlistReconciliations.as_str()).increment(1);
        ::metrics::counter!(MetricName::WishlistItemsReconciled.as_str()).increment(items as u64);
        ::metrics::counter!(MetricName::WishlistDuplicatesCollapsed.as_str())
            .increment(duplicates as u64);
        ::metrics::counter!(MetricName::WishlistRecordsWithoutId.as_str())
            .increment(without_id as u64);
    }

    pub fn short_circuited() {
        ::metrics::counter!(MetricName::WishlistShortCircuits.as_str()).increment(1);
    }

    pub fn stale_discarded() {
        ::metrics::counter!(MetricName::WishlistStaleDiscarded.as_str()).increment(1);
    }
}
