//! Great-circle distance between station positions

use crate::constants::EARTH_RADIUS_KM;

/// Distance in whole meters between two `(latitude, longitude)` points
///
/// Spherical law of cosines on a sphere of [`EARTH_RADIUS_KM`]. Identical
/// points are exactly 0; the cosine is clamped so rounding can never push it
/// outside `acos`'s domain.
pub fn distance_to_station(from: (f64, f64), to: (f64, f64)) -> u64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;
    if lat1 == lat2 && lon1 == lon2 {
        return 0;
    }

    let phi1 = (90.0 - lat1).to_radians();
    let phi2 = (90.0 - lat2).to_radians();
    let theta1 = lon1.to_radians();
    let theta2 = lon2.to_radians();

    let cos = (phi1.sin() * phi2.sin() * (theta1 - theta2).cos() + phi1.cos() * phi2.cos())
        .clamp(-1.0, 1.0);

    (cos.acos() * EARTH_RADIUS_KM * 1000.0).round() as u64
}
