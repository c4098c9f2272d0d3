//! Haversine great-circle distance.

use bigfoot_types::Coordinates;

/// Earth's mean radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers.
///
/// Implements the haversine formula over a spherical Earth of radius
/// 6371 km. Inputs are decimal degrees. The intermediate term is
/// clamped to `[0, 1]` so near-identical and near-antipodal points
/// stay inside `asin`/`atan2`'s domain under floating-point error.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let half_dlat = ((b.lat - a.lat).to_radians() / 2.0).sin();
    let half_dlng = ((b.lng - a.lng).to_radians() / 2.0).sin();

    let h = half_dlat
        .mul_add(half_dlat, lat1.cos() * lat2.cos() * half_dlng * half_dlng)
        .clamp(0.0, 1.0);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * central_angle
}
