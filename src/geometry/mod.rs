//! Route geometry: map view, markers and straight-line path length

pub mod bounds;
pub mod distance;
pub mod markers;
pub mod summary;
pub mod view;

pub use bounds::GeoBounds;
pub use distance::{
    EARTH_RADIUS_KM, haversine_km, path_length_km, route_distance_km, total_distance_km,
};
pub use markers::{MarkerDescriptor, MarkerRole, build_marker_descriptors};
pub use summary::RouteSummary;
pub use view::{MapView, compute_center_and_zoom, zoom_for_span};
