// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Great-circle geometry on a spherical Earth.
//!
//! Routes are modelled as the shortest arc between two points on a sphere
//! of radius [`EARTH_RADIUS_KM`].  All inputs are decimal degrees and all
//! distances are returned in nautical miles.

use qtty::Degrees;

/// Equatorial radius of the Earth used for route lengths, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_378.1;

/// One international nautical mile, in kilometres.
pub const KM_PER_NAUTICAL_MILE: f64 = 1.852;

#[inline]
fn hav(theta: f64) -> f64 {
    let s = (theta / 2.0).sin();
    s * s
}

/// Haversine distance between two coordinates, in nautical miles.
///
/// The result is always within `[0, π · R / 1.852]`.
pub fn distance(lat1: Degrees, lon1: Degrees, lat2: Degrees, lon2: Degrees) -> f64 {
    let (lat1, lon1) = (lat1.value().to_radians(), lon1.value().to_radians());
    let (lat2, lon2) = (lat2.value().to_radians(), lon2.value().to_radians());

    // Rounding can push h a hair above 1 for antipodal points.
    let h = (hav(lat2 - lat1) + lat1.cos() * lat2.cos() * hav(lon2 - lon1)).clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin() / KM_PER_NAUTICAL_MILE
}

/// Point halfway along the great circle joining `(lat1, lon1)` and
/// `(lat2, lon2)`.
///
/// Uses the vector average of both unit-sphere projections.  The returned
/// longitude is normalised to `[-180, 180]`.
pub fn midpoint(lat1: Degrees, lon1: Degrees, lat2: Degrees, lon2: Degrees) -> (Degrees, Degrees) {
    let (lat1, lon1) = (lat1.value().to_radians(), lon1.value().to_radians());
    let (lat2, lon2) = (lat2.value().to_radians(), lon2.value().to_radians());

    let dlon = lon2 - lon1;
    let bx = lat2.cos() * dlon.cos();
    let by = lat2.cos() * dlon.sin();

    let lat = (lat1.sin() + lat2.sin()).atan2(((lat1.cos() + bx).powi(2) + by * by).sqrt());
    let lon = lon1 + by.atan2(lat1.cos() + bx);

    (
        Degrees::new(lat.to_degrees()),
        Degrees::new(normalize_longitude(lon.to_degrees())),
    )
}

fn normalize_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 540.0).rem_euclid(360.0) - 180.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deg(v: f64) -> Degrees {
        Degrees::new(v)
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance(deg(39.55), deg(2.74), deg(39.55), deg(2.74)), 0.0);
    }

    #[test]
    fn distance_lepa_esmx() {
        let d = distance(
            deg(39.551700592),
            deg(2.7388100624),
            deg(56.9291000366),
            deg(14.7279996872),
        );
        assert!((d - 1145.61).abs() < 0.1, "distance = {d} NM");
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = distance(deg(50.90), deg(4.48), deg(50.10), deg(14.26));
        let ba = distance(deg(50.10), deg(14.26), deg(50.90), deg(4.48));
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn antipodal_distance_is_half_circumference() {
        let half = std::f64::consts::PI * EARTH_RADIUS_KM / KM_PER_NAUTICAL_MILE;
        let d = distance(deg(0.0), deg(0.0), deg(0.0), deg(180.0));
        assert!((d - half).abs() < 1e-6);
    }

    #[test]
    fn one_degree_of_meridian() {
        // 60 NM per degree on a 6371 km sphere; slightly more on 6378.1 km.
        let d = distance(deg(0.0), deg(0.0), deg(1.0), deg(0.0));
        assert!((d - 60.107).abs() < 0.01, "distance = {d} NM");
    }

    #[test]
    fn midpoint_on_equator() {
        let (lat, lon) = midpoint(deg(0.0), deg(0.0), deg(0.0), deg(90.0));
        assert!(lat.value().abs() < 1e-12);
        assert!((lon.value() - 45.0).abs() < 1e-12);
    }

    #[test]
    fn midpoint_on_meridian() {
        let (lat, lon) = midpoint(deg(10.0), deg(5.0), deg(30.0), deg(5.0));
        assert!((lat.value() - 20.0).abs() < 1e-9);
        assert!((lon.value() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn midpoint_is_equidistant() {
        let (a_lat, a_lon) = (deg(39.551700592), deg(2.7388100624));
        let (b_lat, b_lon) = (deg(56.9291000366), deg(14.7279996872));
        let (m_lat, m_lon) = midpoint(a_lat, a_lon, b_lat, b_lon);

        let to_a = distance(a_lat, a_lon, m_lat, m_lon);
        let to_b = distance(m_lat, m_lon, b_lat, b_lon);
        let total = distance(a_lat, a_lon, b_lat, b_lon);
        assert!((to_a - to_b).abs() < 1e-6);
        assert!((to_a + to_b - total).abs() < 1e-6);
    }

    #[test]
    fn midpoint_across_antimeridian() {
        let (lat, lon) = midpoint(deg(0.0), deg(170.0), deg(0.0), deg(-170.0));
        assert!(lat.value().abs() < 1e-9);
        assert!((lon.value().abs() - 180.0).abs() < 1e-9, "lon = {}", lon.value());
    }
}
