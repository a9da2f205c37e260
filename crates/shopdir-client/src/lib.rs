//! REST client for the shop listing API.

pub mod client;
pub mod error;
pub mod normalize;
mod retry;
pub mod types;

pub use client::ShopApiClient;
pub use error::ClientError;
pub use normalize::{normalize_items, normalize_shop};
pub use types::{RawShop, ShopListResponse};
