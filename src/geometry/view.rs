use serde::Serialize;

use super::GeoBounds;
use crate::domain::{Geolocation, Waypoint};

/// Zoom used once the span exceeds every step below
const WIDEST_ZOOM: u8 = 9;

/// (exclusive upper bound on span in degrees, zoom level), ascending by span
const ZOOM_STEPS: [(f64, u8); 7] = [
    (0.005, 16),
    (0.01, 15),
    (0.02, 14),
    (0.05, 13),
    (0.1, 12),
    (0.2, 11),
    (0.5, 10),
];

/// Center and zoom level for a static map image of a route
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub center: Geolocation,
    pub zoom_level: u8,
}

/// Pick a zoom level for a bounding-box span; the first (smallest) bound wins
pub fn zoom_for_span(span: f64) -> u8 {
    ZOOM_STEPS
        .iter()
        .find(|(bound, _)| span < *bound)
        .map(|&(_, zoom)| zoom)
        .unwrap_or(WIDEST_ZOOM)
}

/// Compute the bounding-box center and zoom level of a route
///
/// Returns `None` for an empty route; callers render a placeholder instead.
/// A NaN coordinate yields a NaN center, which callers must not put on a map.
pub fn compute_center_and_zoom(waypoints: &[Waypoint]) -> Option<MapView> {
    let bounds = GeoBounds::from_waypoints(waypoints)?;

    Some(MapView {
        center: bounds.center(),
        zoom_level: zoom_for_span(bounds.max_span()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_steps() {
        assert_eq!(zoom_for_span(0.0), 16);
        assert_eq!(zoom_for_span(0.004), 16);
        assert_eq!(zoom_for_span(0.005), 15);
        assert_eq!(zoom_for_span(0.015), 14);
        assert_eq!(zoom_for_span(0.03), 13);
        assert_eq!(zoom_for_span(0.07), 12);
        assert_eq!(zoom_for_span(0.15), 11);
        assert_eq!(zoom_for_span(0.3), 10);
        assert_eq!(zoom_for_span(0.5), 9);
        assert_eq!(zoom_for_span(1.0), 9);
    }

    #[test]
    fn test_zoom_monotonic() {
        let mut previous = u8::MAX;
        for i in 0..=2000 {
            let span = i as f64 * 0.0005;
            let zoom = zoom_for_span(span);
            assert!(zoom <= previous, "zoom increased at span {}", span);
            previous = zoom;
        }
    }

    #[test]
    fn test_single_waypoint() {
        let view = compute_center_and_zoom(&[Waypoint::new("a", "start", 37.5, 127.0)]).unwrap();
        assert_eq!(view.center, Geolocation::new(37.5, 127.0));
        assert_eq!(view.zoom_level, 16);
    }

    #[test]
    fn test_wide_route() {
        let waypoints = vec![
            Waypoint::new("a", "start", 37.5, 127.0),
            Waypoint::new("b", "end", 37.5, 128.0),
        ];
        let view = compute_center_and_zoom(&waypoints).unwrap();
        assert_eq!(view.zoom_level, 9);
        assert!((view.center.latitude - 37.5).abs() < 1e-9);
        assert!((view.center.longitude - 127.5).abs() < 1e-9);
    }

    #[test]
    fn test_uses_larger_span() {
        // lat span 0.03, lng span 0.008
        let waypoints = vec![
            Waypoint::new("a", "start", 37.50, 127.000),
            Waypoint::new("b", "end", 37.53, 127.008),
        ];
        assert_eq!(compute_center_and_zoom(&waypoints).unwrap().zoom_level, 13);
    }

    #[test]
    fn test_empty_route() {
        assert_eq!(compute_center_and_zoom(&[]), None);
    }

    #[test]
    fn test_nan_coordinate_gives_nan_center() {
        let waypoints = vec![
            Waypoint::new("a", "start", 37.5, 127.001),
            Waypoint::new("b", "end", f64::NAN, 127.0),
        ];
        let view = compute_center_and_zoom(&waypoints).unwrap();
        assert!(view.center.is_nan());
        assert_eq!(view.zoom_level, WIDEST_ZOOM);
    }

    #[test]
    fn test_idempotent() {
        let waypoints = vec![
            Waypoint::new("a", "start", 37.512, 127.031),
            Waypoint::new("b", "via", 37.498, 127.107),
            Waypoint::new("c", "end", 37.566, 127.069),
        ];
        let first = compute_center_and_zoom(&waypoints).unwrap();
        let second = compute_center_and_zoom(&waypoints).unwrap();

        assert_eq!(first.center.latitude.to_bits(), second.center.latitude.to_bits());
        assert_eq!(first.center.longitude.to_bits(), second.center.longitude.to_bits());
        assert_eq!(first.zoom_level, second.zoom_level);
    }
}
