use crate::catalog::CatalogFetcher;
use crate::common::types::NormalizedWishlistItem;
use crate::observability::metrics;
use crate::reconcile::{reconcile_with_stats, resolve_image_url};
use crate::wishlist::WishlistIds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// A reconciled item together with its detail page route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedItem {
    #[serde(flatten)]
    pub item: NormalizedWishlistItem,
    pub route: String,
}

impl From<NormalizedWishlistItem> for RoutedItem {
    fn from(item: NormalizedWishlistItem) -> Self {
        let route = item.route();
        Self { item, route }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub items: Vec<RoutedItem>,
    pub fetched_records: usize,
    pub duplicates_collapsed: usize,
    pub generated_at: DateTime<Utc>,
}

impl ReconcileReport {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            fetched_records: 0,
            duplicates_collapsed: 0,
            generated_at: Utc::now(),
        }
    }
}

/// What a wishlist page currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum WishlistState {
    Loading,
    Ready(ReconcileReport),
}

/// Holder for a view's wishlist state; results arriving after teardown are dropped.
pub struct WishlistView {
    alive: AtomicBool,
    state: RwLock<WishlistState>,
}

impl Default for WishlistView {
    fn default() -> Self {
        Self::new()
    }
}

impl WishlistView {
    pub fn new() -> Self {
        Self {
            alive: AtomicBool::new(true),
            state: RwLock::new(WishlistState::Loading),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    pub fn teardown(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    pub async fn state(&self) -> WishlistState {
        self.state.read().await.clone()
    }

    async fn set_loading(&self) {
        *self.state.write().await = WishlistState::Loading;
    }

    /// Returns false when the view was torn down and the report was discarded.
    async fn apply(&self, report: ReconcileReport) -> bool {
        if !self.is_alive() {
            debug!("View torn down, discarding stale wishlist result");
            metrics::wishlist::stale_discarded();
            return false;
        }
        *self.state.write().await = WishlistState::Ready(report);
        true
    }
}

pub struct WishlistUseCase {
    fetcher: CatalogFetcher,
}

impl WishlistUseCase {
    pub fn new(fetcher: CatalogFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetch every catalog and reconcile it against `wishlist`.
    ///
    /// An empty wishlist returns straight away without touching the network.
    #[instrument(skip(self, wishlist), fields(wishlist_size = wishlist.len()))]
    pub async fn reconcile(&self, wishlist: &WishlistIds) -> ReconcileReport {
        if wishlist.is_empty() {
            debug!("Empty wishlist, skipping catalog fetch");
            metrics::wishlist::short_circuited();
            return ReconcileReport::empty();
        }

        let catalog = self.fetcher.fetch_all_catalogs().await;
        let outcome = reconcile_with_stats(wishlist.as_slice(), &catalog);
        metrics::wishlist::reconciled(
            outcome.items.len(),
            outcome.duplicates_collapsed,
            outcome.records_without_id,
        );

        let media_base = self.fetcher.api().media_base();
        let items: Vec<RoutedItem> = outcome
            .items
            .into_iter()
            .map(|mut item| {
                item.image = item.image.map(|image| resolve_image_url(media_base, &image));
                RoutedItem::from(item)
            })
            .collect();

        info!(
            "Reconciled {} of {} wishlist ids against {} catalog records",
            items.len(),
            wishlist.len(),
            catalog.len()
        );

        ReconcileReport {
            items,
            fetched_records: catalog.len(),
            duplicates_collapsed: outcome.duplicates_collapsed,
            generated_at: Utc::now(),
        }
    }

    /// Reconcile into `view`; returns false if the view went away meanwhile.
    pub async fn refresh(&self, wishlist: &WishlistIds, view: &WishlistView) -> bool {
        if !view.is_alive() {
            return false;
        }
        view.set_loading().await;
        let report = self.reconcile(wishlist).await;
        view.apply(report).await
    }
}
