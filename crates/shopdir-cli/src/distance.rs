use shopdir_core::{distance_km, format_distance_km, GeoPoint};

/// Print the great-circle distance between two points.
///
/// # Errors
///
/// Returns an error if either point is out of range.
pub(crate) fn run_distance(
    from_lat: f64,
    from_lng: f64,
    to_lat: f64,
    to_lng: f64,
) -> anyhow::Result<()> {
    let from = GeoPoint::new(from_lat, from_lng)?;
    let to = GeoPoint::new(to_lat, to_lng)?;
    let km = distance_km(from, to);
    println!("{} ({km:.3} km)", format_distance_km(km));
    Ok(())
}
