// Common utilities and shared types used across the application

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Result, WishlistError};
pub use types::{NormalizedWishlistItem, RawCatalogRecord, SourceTag};
