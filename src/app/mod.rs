// Application layer: ports and use cases

pub mod ports;
pub mod wishlist_use_case;

pub use wishlist_use_case::{ReconcileReport, RoutedItem, WishlistState, WishlistUseCase, WishlistView};
