use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geo::GeoPoint;
use crate::hours::OpeningHours;

/// GeoJSON point as stored on shop records: `coordinates` is `[lon, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopLocation {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl ShopLocation {
    #[must_use]
    pub fn point(lon: f64, lat: f64) -> Self {
        Self {
            kind: Some("Point".to_string()),
            coordinates: vec![lon, lat],
        }
    }
}

/// A normalized shop listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ShopLocation>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub opening_hours: OpeningHours,
    /// Moderation flag. `None` means the source does not track approval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

impl ShopRecord {
    /// The shop's position, converted from GeoJSON axis order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingShopLocation`] if the record has no
    /// location or its coordinates are not exactly two numbers, and
    /// [`CoreError::InvalidCoordinate`] if they are out of range.
    pub fn geo_point(&self) -> Result<GeoPoint, CoreError> {
        match self.location.as_ref().map(|l| l.coordinates.as_slice()) {
            Some(&[lon, lat]) => GeoPoint::from_lon_lat([lon, lat]),
            _ => Err(CoreError::MissingShopLocation {
                shop_id: self.id.clone(),
            }),
        }
    }

    /// Case-insensitive match in either direction: a label containing the
    /// query, or the query containing a label.
    #[must_use]
    pub fn matches_category(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.categories.iter().any(|label| {
            let label = label.to_lowercase();
            label.contains(&query) || query.contains(&label)
        })
    }
}

/// A shop with its distance from the search reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceAnnotatedShop {
    #[serde(flatten)]
    pub shop: ShopRecord,
    pub distance_km: f64,
}
