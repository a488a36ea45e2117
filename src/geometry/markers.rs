use serde::Serialize;

use crate::domain::{Geolocation, Waypoint};

/// Role of a waypoint along its route, decided by position alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerRole {
    Start,
    Via,
    End,
}

impl MarkerRole {
    /// Role of the waypoint at `index` in a route of `len` points.
    /// A single-point route is a start, never an end.
    pub fn for_index(index: usize, len: usize) -> Self {
        match index {
            0 => MarkerRole::Start,
            i if i + 1 == len => MarkerRole::End,
            _ => MarkerRole::Via,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerRole::Start => "start",
            MarkerRole::Via => "via",
            MarkerRole::End => "end",
        }
    }
}

impl std::fmt::Display for MarkerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerDescriptor {
    pub position: Geolocation,
    pub role: MarkerRole,
}

/// One marker per waypoint, in route order
pub fn build_marker_descriptors(waypoints: &[Waypoint]) -> Vec<MarkerDescriptor> {
    let len = waypoints.len();
    waypoints
        .iter()
        .enumerate()
        .map(|(i, w)| MarkerDescriptor {
            position: w.position,
            role: MarkerRole::for_index(i, len),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> Vec<Waypoint> {
        vec![
            Waypoint::new("A", "start", 37.50, 127.00),
            Waypoint::new("B", "via", 37.55, 127.10),
            Waypoint::new("C", "via", 37.58, 127.08),
            Waypoint::new("D", "end", 37.62, 127.05),
        ]
    }

    fn roles(markers: &[MarkerDescriptor]) -> Vec<MarkerRole> {
        markers.iter().map(|m| m.role).collect()
    }

    #[test]
    fn test_roles_by_position() {
        let markers = build_marker_descriptors(&route());
        assert_eq!(
            roles(&markers),
            vec![
                MarkerRole::Start,
                MarkerRole::Via,
                MarkerRole::Via,
                MarkerRole::End
            ]
        );
        assert_eq!(markers[1].position, Geolocation::new(37.55, 127.10));
    }

    #[test]
    fn test_single_waypoint_is_start() {
        let markers = build_marker_descriptors(&[Waypoint::new("A", "start", 37.5, 127.0)]);
        assert_eq!(roles(&markers), vec![MarkerRole::Start]);
    }

    #[test]
    fn test_two_waypoints_have_no_via() {
        let markers = build_marker_descriptors(&route()[..2]);
        assert_eq!(roles(&markers), vec![MarkerRole::Start, MarkerRole::End]);
    }

    #[test]
    fn test_reversed_route_swaps_endpoints() {
        let mut reversed = route();
        reversed.reverse();
        let markers = build_marker_descriptors(&reversed);

        assert_eq!(markers[0].role, MarkerRole::Start);
        assert_eq!(markers[0].position, Geolocation::new(37.62, 127.05));
        assert_eq!(markers[3].role, MarkerRole::End);
        assert_eq!(markers[3].position, Geolocation::new(37.50, 127.00));
    }

    #[test]
    fn test_idempotent() {
        let waypoints = route();
        let first = build_marker_descriptors(&waypoints);
        let second = build_marker_descriptors(&waypoints);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.role, b.role);
            assert_eq!(a.position.latitude.to_bits(), b.position.latitude.to_bits());
            assert_eq!(a.position.longitude.to_bits(), b.position.longitude.to_bits());
        }
    }

    #[test]
    fn test_empty() {
        assert!(build_marker_descriptors(&[]).is_empty());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MarkerRole::Via).unwrap(), r#""via""#);
    }
}
