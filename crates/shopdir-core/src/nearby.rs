//! Distance-annotated, category-filtered, nearest-first shop lists.
//!
//! The pipeline runs in a fixed order: category filter, distance annotation,
//! optional radius filter, then a stable ascending sort so shops at equal
//! distance keep their input order. Nothing is truncated here; callers pick
//! how many results to show.

use crate::geo::{distance_km, GeoPoint};
use crate::shop::{DistanceAnnotatedShop, ShopRecord};

/// Whether shops beyond the radius are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadiusPolicy {
    /// Keep only shops with `distance_km <= radius_km`.
    #[default]
    Filter,
    /// Annotate and sort every shop regardless of distance.
    Unbounded,
}

#[derive(Debug, Clone)]
pub struct NearbyQuery<'a> {
    pub reference: GeoPoint,
    pub radius_km: f64,
    /// Empty or `None` disables category filtering.
    pub category: Option<&'a str>,
    pub radius_policy: RadiusPolicy,
}

/// Shops within `radius_km` of `reference`, nearest first.
#[must_use]
pub fn find_nearby(
    shops: &[ShopRecord],
    reference: GeoPoint,
    radius_km: f64,
    category: Option<&str>,
) -> Vec<DistanceAnnotatedShop> {
    run_nearby(
        shops,
        &NearbyQuery {
            reference,
            radius_km,
            category,
            radius_policy: RadiusPolicy::Filter,
        },
    )
}

/// Every shop with a usable location, annotated and sorted nearest first.
#[must_use]
pub fn sort_by_distance(
    shops: &[ShopRecord],
    reference: GeoPoint,
    category: Option<&str>,
) -> Vec<DistanceAnnotatedShop> {
    run_nearby(
        shops,
        &NearbyQuery {
            reference,
            radius_km: f64::INFINITY,
            category,
            radius_policy: RadiusPolicy::Unbounded,
        },
    )
}

/// Run the full pipeline for `query`.
///
/// Shops without a usable location are skipped with a warning. A
/// non-positive (or NaN) radius under [`RadiusPolicy::Filter`] yields an
/// empty list.
#[must_use]
pub fn run_nearby(shops: &[ShopRecord], query: &NearbyQuery<'_>) -> Vec<DistanceAnnotatedShop> {
    let filter_radius = query.radius_policy == RadiusPolicy::Filter;
    if filter_radius && (query.radius_km.is_nan() || query.radius_km <= 0.0) {
        return Vec::new();
    }

    let category = query.category.filter(|c| !c.is_empty());

    let mut annotated: Vec<DistanceAnnotatedShop> = shops
        .iter()
        .filter(|shop| category.is_none_or(|c| shop.matches_category(c)))
        .filter_map(|shop| match shop.geo_point() {
            Ok(point) => Some(DistanceAnnotatedShop {
                shop: shop.clone(),
                distance_km: distance_km(query.reference, point),
            }),
            Err(e) => {
                tracing::warn!(shop_id = %shop.id, error = %e, "skipping shop without usable location");
                None
            }
        })
        .filter(|a| !filter_radius || a.distance_km <= query.radius_km)
        .collect();

    annotated.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    tracing::debug!(
        input = shops.len(),
        matched = annotated.len(),
        radius_km = query.radius_km,
        category = category.unwrap_or(""),
        "nearby pipeline complete"
    );

    annotated
}

#[cfg(test)]
#[path = "nearby_test.rs"]
mod tests;
