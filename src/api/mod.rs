pub mod client;
pub mod static_map;

pub use client::{ApiClient, HealthStatus};
pub use static_map::{
    CourseImages, DETAIL_SIZE, StaticMapClient, THUMBNAIL_SIZE, image_paths, marker_color,
};
