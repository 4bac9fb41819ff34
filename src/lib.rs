pub mod app;
pub mod catalog;
pub mod common;
pub mod config;
pub mod identity;
pub mod infra;
pub mod observability;
pub mod reconcile;
pub mod server;
pub mod shape;
pub mod wishlist;

pub use catalog::CatalogFetcher;
pub use common::{NormalizedWishlistItem, RawCatalogRecord, SourceTag, WishlistError};
pub use identity::extract_id;
pub use reconcile::reconcile;
pub use shape::normalize;
pub use wishlist::WishlistIds;
