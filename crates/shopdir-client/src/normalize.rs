//! Normalization from raw API records to [`shopdir_core::ShopRecord`].

use shopdir_core::{ShopLocation, ShopRecord};

use crate::error::ClientError;
use crate::types::RawShop;

/// Normalizes a raw API record.
///
/// The id is taken from `_id`, falling back to `id`. Missing text fields
/// become empty strings and a missing schedule becomes an empty one. A
/// missing or malformed location is kept as-is; the nearby pipeline skips
/// such shops.
///
/// # Errors
///
/// Returns [`ClientError::Normalization`] if the record has no usable id.
pub fn normalize_shop(raw: RawShop) -> Result<ShopRecord, ClientError> {
    let id = raw
        .mongo_id
        .or(raw.id)
        .map(crate::types::RawId::into_string)
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ClientError::Normalization {
            reason: format!(
                "shop '{}' has neither _id nor id",
                raw.name.as_deref().unwrap_or("<unnamed>")
            ),
        })?;

    let location = raw.location.map(|loc| ShopLocation {
        kind: loc.kind,
        coordinates: loc.coordinates.unwrap_or_default(),
    });

    Ok(ShopRecord {
        id,
        name: raw.name.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        address: raw.address.unwrap_or_default(),
        location,
        categories: raw.categories.unwrap_or_default(),
        opening_hours: raw.opening_hours.unwrap_or_default(),
        approved: raw.approved,
    })
}

/// Normalizes a page of raw JSON items, skipping any that fail to
/// deserialize or normalize.
#[must_use]
pub fn normalize_items(items: Vec<serde_json::Value>) -> Vec<ShopRecord> {
    let total = items.len();
    let shops: Vec<ShopRecord> = items
        .into_iter()
        .filter_map(|item| {
            let raw = match serde_json::from_value::<RawShop>(item) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping undecodable shop record");
                    return None;
                }
            };
            match normalize_shop(raw) {
                Ok(shop) => Some(shop),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping shop record");
                    None
                }
            }
        })
        .collect();

    if shops.len() < total {
        tracing::info!(
            kept = shops.len(),
            skipped = total - shops.len(),
            "normalized shop page with skipped records"
        );
    }
    shops
}
