use crate::domain::{Geolocation, Waypoint};

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points on a spherical Earth
pub fn haversine_km(from: Geolocation, to: Geolocation) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Unrounded sum of the straight-line segments between consecutive waypoints
pub fn path_length_km(waypoints: &[Waypoint]) -> f64 {
    waypoints
        .windows(2)
        .map(|pair| haversine_km(pair[0].position, pair[1].position))
        .sum()
}

/// Straight-line route length in km, rounded to one decimal
///
/// This is the distance between successive named waypoints, not the road
/// distance. Routes with fewer than two waypoints measure `0.0`.
pub fn total_distance_km(waypoints: &[Waypoint]) -> f64 {
    round_to_tenth(path_length_km(waypoints))
}

/// Like [`total_distance_km`], but `None` when there is no segment to measure
pub fn route_distance_km(waypoints: &[Waypoint]) -> Option<f64> {
    if waypoints.len() < 2 {
        return None;
    }
    Some(total_distance_km(waypoints))
}

fn round_to_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> Waypoint {
        Waypoint::new("A", "start", 37.50, 127.00)
    }
    fn b() -> Waypoint {
        Waypoint::new("B", "via", 37.55, 127.10)
    }
    fn c() -> Waypoint {
        Waypoint::new("C", "end", 37.62, 127.05)
    }

    #[test]
    fn test_one_degree_longitude() {
        let waypoints = vec![
            Waypoint::new("A", "start", 37.5, 127.0),
            Waypoint::new("B", "end", 37.5, 128.0),
        ];
        // 111.19 km * cos(37.5)
        let km = total_distance_km(&waypoints);
        assert!((km - 88.2).abs() < 1e-9, "got {}", km);
    }

    #[test]
    fn test_one_degree_latitude() {
        let km = haversine_km(Geolocation::new(0.0, 0.0), Geolocation::new(1.0, 0.0));
        assert!((km - 111.19).abs() < 0.01);
    }

    #[test]
    fn test_sum_of_segments() {
        let route = vec![a(), b(), c()];
        let expected = haversine_km(a().position, b().position) + haversine_km(b().position, c().position);
        assert!((path_length_km(&route) - expected).abs() < 1e-9);
        assert!((total_distance_km(&route) - 19.4).abs() < 1e-9);
    }

    #[test]
    fn test_reverse_is_symmetric() {
        let forward = vec![a(), b(), c()];
        let reverse = vec![c(), b(), a()];
        assert!((path_length_km(&forward) - path_length_km(&reverse)).abs() < 1e-9);
        assert_eq!(total_distance_km(&forward), total_distance_km(&reverse));
    }

    #[test]
    fn test_degenerate_routes() {
        assert_eq!(total_distance_km(&[]), 0.0);
        assert_eq!(total_distance_km(&[a()]), 0.0);
        assert_eq!(route_distance_km(&[]), None);
        assert_eq!(route_distance_km(&[a()]), None);
        // a real zero-length route is still measured
        assert_eq!(route_distance_km(&[a(), a()]), Some(0.0));
    }

    #[test]
    fn test_idempotent() {
        let route = vec![a(), b(), c()];
        let first = total_distance_km(&route);
        let second = total_distance_km(&route);
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
