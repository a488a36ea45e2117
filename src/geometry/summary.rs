use serde::Serialize;

use super::{MapView, MarkerDescriptor, build_marker_descriptors, compute_center_and_zoom, route_distance_km};
use crate::domain::Waypoint;

/// Everything a renderer needs to draw a route
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub view: Option<MapView>,
    pub markers: Vec<MarkerDescriptor>,
    /// Straight-line length, `None` below two waypoints
    pub total_distance_km: Option<f64>,
}

impl RouteSummary {
    pub fn of(waypoints: &[Waypoint]) -> Self {
        Self {
            view: compute_center_and_zoom(waypoints),
            markers: build_marker_descriptors(waypoints),
            total_distance_km: route_distance_km(waypoints),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
