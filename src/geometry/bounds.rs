use geo::{Rect, coord};

use crate::domain::{Geolocation, Waypoint};

/// Axis-aligned bounding box of a route in degrees
///
/// A NaN coordinate anywhere in the route poisons the whole box, so the
/// center and spans come out NaN regardless of where it sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    rect: Rect<f64>,
}

impl GeoBounds {
    /// Create bounds from a set of waypoints, `None` if there are none
    pub fn from_waypoints(waypoints: &[Waypoint]) -> Option<Self> {
        if waypoints.is_empty() {
            return None;
        }

        if waypoints.iter().any(|w| w.position.is_nan()) {
            let nan = coord! { x: f64::NAN, y: f64::NAN };
            return Some(Self {
                rect: Rect::new(nan, nan),
            });
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for w in waypoints {
            min_x = min_x.min(w.longitude());
            min_y = min_y.min(w.latitude());
            max_x = max_x.max(w.longitude());
            max_y = max_y.max(w.latitude());
        }

        Some(Self {
            rect: Rect::new(coord! { x: min_x, y: min_y }, coord! { x: max_x, y: max_y }),
        })
    }

    pub fn min(&self) -> Geolocation {
        let c = self.rect.min();
        Geolocation::new(c.y, c.x)
    }

    pub fn max(&self) -> Geolocation {
        let c = self.rect.max();
        Geolocation::new(c.y, c.x)
    }

    /// Midpoint of the box (not the centroid of the points)
    pub fn center(&self) -> Geolocation {
        let c = self.rect.center();
        Geolocation::new(c.y, c.x)
    }

    pub fn is_nan(&self) -> bool {
        self.center().is_nan()
    }

    pub fn lat_span(&self) -> f64 {
        self.rect.height()
    }

    pub fn lng_span(&self) -> f64 {
        self.rect.width()
    }

    /// Larger of the two extents, drives the zoom level
    pub fn max_span(&self) -> f64 {
        // f64::max would drop the NaN
        if self.is_nan() {
            return f64::NAN;
        }
        self.lat_span().max(self.lng_span())
    }
}
