pub mod course;
pub mod filter;
pub mod recommendation;

pub use course::{Course, CourseRatings, Geolocation, Waypoint};
pub use filter::{CourseFilters, RatingRange};
pub use recommendation::{Recommendation, RecommendationRecord};
