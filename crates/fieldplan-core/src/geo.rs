//! Great-circle distance and geofence checks.
//!
//! Pure functions, no state. The geofence radius decides whether a worker
//! currently counts as "on site" for an in-progress task.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (haversine).
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Default geofence radius around a task's store, in meters.
pub const DEFAULT_GEOFENCE_RADIUS_METERS: f64 = 200.0;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Haversine distance between two points, in meters.
pub fn distance_meters(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_METERS * c
}

/// Whether `current` lies within `radius_meters` of `target`.
/// A point exactly on the boundary counts as inside.
pub fn is_within_geofence(current: Coordinates, target: Coordinates, radius_meters: f64) -> bool {
    distance_meters(current, target) <= radius_meters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = Coordinates::new(45.4642, 9.1900);
        assert_eq!(distance_meters(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let milan = Coordinates::new(45.4642, 9.1900);
        let rome = Coordinates::new(41.9028, 12.4964);
        let there = distance_meters(milan, rome);
        let back = distance_meters(rome, milan);
        assert!((there - back).abs() < 1e-6);
    }

    #[test]
    fn known_distance_milan_rome() {
        // Great-circle Milan <-> Rome is roughly 477 km.
        let milan = Coordinates::new(45.4642, 9.1900);
        let rome = Coordinates::new(41.9028, 12.4964);
        let d = distance_meters(milan, rome);
        assert!(d > 470_000.0 && d < 485_000.0, "got {d}");
    }

    #[test]
    fn geofence_boundary_is_inclusive() {
        let a = Coordinates::new(45.4642, 9.1900);
        let b = Coordinates::new(45.4650, 9.1910);
        let r = distance_meters(a, b);
        assert!(is_within_geofence(a, b, r));
        assert!(!is_within_geofence(a, b, r - 0.001));
    }

    #[test]
    fn geofence_default_radius_scale() {
        let store = Coordinates::new(45.4642, 9.1900);
        // ~111 m north of the store.
        let nearby = Coordinates::new(45.4652, 9.1900);
        // ~1.1 km north of the store.
        let faraway = Coordinates::new(45.4742, 9.1900);
        assert!(is_within_geofence(nearby, store, DEFAULT_GEOFENCE_RADIUS_METERS));
        assert!(!is_within_geofence(faraway, store, DEFAULT_GEOFENCE_RADIUS_METERS));
    }
}
