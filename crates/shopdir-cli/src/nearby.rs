use chrono::{DateTime, Utc};
use shopdir_core::{
    evaluate_status, format_distance_km, run_nearby, DistanceAnnotatedShop, GeoPoint, NearbyQuery,
    RadiusPolicy, TimeContext,
};

use crate::source::ShopSource;

#[derive(Debug)]
pub(crate) struct NearbyOptions {
    pub lat: f64,
    pub lng: f64,
    pub radius_km: f64,
    pub category: Option<String>,
    pub unbounded: bool,
    pub limit: usize,
}

/// List shops near a point, nearest first, with their current status.
///
/// # Errors
///
/// Returns an error if the point is out of range or the shop source fails.
pub(crate) async fn run_nearby_command(
    source: &ShopSource,
    options: &NearbyOptions,
    now: DateTime<Utc>,
    ctx: TimeContext,
) -> anyhow::Result<()> {
    let reference = GeoPoint::new(options.lat, options.lng)?;
    let radius_policy = if options.unbounded {
        RadiusPolicy::Unbounded
    } else {
        RadiusPolicy::Filter
    };

    if radius_policy == RadiusPolicy::Filter
        && (options.radius_km.is_nan() || options.radius_km <= 0.0)
    {
        println!("no shops found: radius must be positive");
        return Ok(());
    }

    let candidates = match radius_policy {
        RadiusPolicy::Filter => source.near(reference, options.radius_km).await?,
        RadiusPolicy::Unbounded => source.all().await?,
    };

    let results = run_nearby(
        &candidates,
        &NearbyQuery {
            reference,
            radius_km: options.radius_km,
            category: options.category.as_deref(),
            radius_policy,
        },
    );

    if results.is_empty() {
        match radius_policy {
            RadiusPolicy::Filter => println!(
                "no shops found within {}",
                format_distance_km(options.radius_km)
            ),
            RadiusPolicy::Unbounded => println!("no shops found"),
        }
        return Ok(());
    }

    for line in format_nearby(&results, options.limit, now, ctx) {
        println!("{line}");
    }
    if results.len() > options.limit {
        println!("... and {} more", results.len() - options.limit);
    }

    Ok(())
}

/// Render the first `limit` results as ranked lines.
pub(crate) fn format_nearby(
    results: &[DistanceAnnotatedShop],
    limit: usize,
    now: DateTime<Utc>,
    ctx: TimeContext,
) -> Vec<String> {
    results
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, annotated)| {
            let status = evaluate_status(&annotated.shop.opening_hours, now, ctx);
            format!(
                "{:>2}. {:<28}{:>9}  {}",
                i + 1,
                annotated.shop.name,
                format_distance_km(annotated.distance_km),
                status.message
            )
        })
        .collect()
}
