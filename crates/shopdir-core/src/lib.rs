//! Shop directory core: distance, opening-hours status, and nearby-shop search.
//!
//! Everything here is synchronous and free of I/O except [`load_catalog`]
//! and [`load_app_config`].

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geo;
pub mod hours;
pub mod nearby;
pub mod search;
pub mod shop;

pub use app_config::AppConfig;
pub use catalog::{load_catalog, parse_catalog, CatalogFormat};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use geo::{distance_km, format_distance_km, GeoPoint, EARTH_RADIUS_KM};
pub use hours::{
    evaluate_at, evaluate_status, evaluate_status_strict, format_working_hours, DayHours,
    OpeningHours, ShopStatus, StatusState, TimeContext,
};
pub use nearby::{find_nearby, run_nearby, sort_by_distance, NearbyQuery, RadiusPolicy};
pub use search::{approved_only, search_shops};
pub use shop::{DistanceAnnotatedShop, ShopLocation, ShopRecord};
