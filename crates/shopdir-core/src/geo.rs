//! Great-circle distance between shop coordinates.
//!
//! Coordinates are decimal degrees. Shop records carry GeoJSON-ordered
//! `[longitude, latitude]` pairs; use [`GeoPoint::from_lon_lat`] to convert
//! them so the axes are never swapped by hand.

use serde::Serialize;

use crate::error::CoreError;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated `(latitude, longitude)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Build a point, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] if latitude is outside
    /// `[-90, 90]` or longitude is outside `[-180, 180]`.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoreError> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lon_ok = lon.is_finite() && (-180.0..=180.0).contains(&lon);
        if lat_ok && lon_ok {
            Ok(Self { lat, lon })
        } else {
            Err(CoreError::InvalidCoordinate { lat, lon })
        }
    }

    /// Convert a GeoJSON `[longitude, latitude]` pair.
    ///
    /// # Errors
    ///
    /// Same as [`GeoPoint::new`].
    pub fn from_lon_lat(coordinates: [f64; 2]) -> Result<Self, CoreError> {
        let [lon, lat] = coordinates;
        Self::new(lat, lon)
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Haversine distance between two points, in kilometres. Not rounded.
#[must_use]
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1.0 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Render a distance for display, e.g. `2.3 km`.
#[must_use]
pub fn format_distance_km(distance_km: f64) -> String {
    format!("{distance_km:.1} km")
}
