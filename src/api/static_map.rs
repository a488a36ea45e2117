use reqwest::Url;
use reqwest::blocking::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::StaticMapConfig;
use crate::domain::Course;
use crate::error::{ApiError, Result};
use crate::geometry::{MarkerDescriptor, MarkerRole, build_marker_descriptors, compute_center_and_zoom};

/// (width, height) of the list thumbnail
pub const THUMBNAIL_SIZE: (u32, u32) = (500, 500);
/// (width, height) of the detail page image
pub const DETAIL_SIZE: (u32, u32) = (800, 600);

const KEY_ID_HEADER: &str = "x-ncp-apigw-api-key-id";
const KEY_HEADER: &str = "x-ncp-apigw-api-key";

/// Marker color for each route role
pub fn marker_color(role: MarkerRole) -> &'static str {
    match role {
        MarkerRole::Start => "red",
        MarkerRole::End => "green",
        MarkerRole::Via => "blue",
    }
}

fn marker_param(marker: &MarkerDescriptor) -> String {
    // position is "lng lat" with the space pre-encoded
    format!(
        "type:d|size:mid|color:{}|pos:{:.6}%20{:.6}",
        marker_color(marker.role),
        marker.position.longitude,
        marker.position.latitude
    )
}

/// Files written for one course
#[derive(Debug, Clone, PartialEq)]
pub struct CourseImages {
    pub thumbnail: PathBuf,
    pub detail: PathBuf,
}

/// Client for the raster static map service
#[derive(Debug, Clone)]
pub struct StaticMapClient {
    http: Client,
    base: Url,
    config: StaticMapConfig,
}

impl StaticMapClient {
    pub fn new(config: StaticMapConfig, timeout: Duration) -> Result<Self> {
        let base = Url::parse(&config.url).map_err(|e| ApiError::InvalidUrl {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Request {
                url: config.url.clone(),
                source,
            })?;

        Ok(Self { http, base, config })
    }

    /// Static map URL centered on the course with one marker per waypoint.
    /// `None` when the course has no route or a waypoint is NaN.
    pub fn build_url(&self, course: &Course, width: u32, height: u32) -> Option<String> {
        let view = compute_center_and_zoom(&course.nav)?;
        if view.center.is_nan() {
            tracing::warn!("Course {} has NaN coordinates, skipping map image", course.id);
            return None;
        }

        let mut url = self.base.clone();
        url.query_pairs_mut().extend_pairs(&[
            ("w", width.to_string()),
            ("h", height.to_string()),
            (
                "center",
                format!("{:.6},{:.6}", view.center.longitude, view.center.latitude),
            ),
            ("level", view.zoom_level.to_string()),
            ("scale", "2".to_string()),
            ("format", "png".to_string()),
        ]);

        // markers are appended raw so the service sees the pipes unencoded
        let markers: String = build_marker_descriptors(&course.nav)
            .iter()
            .map(|m| format!("&markers={}", marker_param(m)))
            .collect();

        Some(format!("{}{}", url, markers))
    }

    /// Download an image to `path`, creating parent directories
    pub fn download(&self, url: &str, path: &Path) -> Result<()> {
        if !self.config.has_credentials() {
            return Err(ApiError::MissingCredentials);
        }

        tracing::debug!("Downloading static map to {}", path.display());
        let response = self
            .http
            .get(url)
            .header(KEY_ID_HEADER, &self.config.client_id)
            .header(KEY_HEADER, &self.config.client_secret)
            .send()
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let bytes = response.bytes().map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })?;

        let io_err = |source: std::io::Error| ApiError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, &bytes).map_err(io_err)?;

        Ok(())
    }

    /// Write the thumbnail and detail images of a course under `out_dir`
    pub fn generate_for_course(&self, course: &Course, out_dir: &Path) -> Result<CourseImages> {
        if !self.config.has_credentials() {
            return Err(ApiError::MissingCredentials);
        }

        if !course.has_route() {
            return Err(ApiError::NoRoute(course.id));
        }

        let images = image_paths(course.id, out_dir);

        let (w, h) = THUMBNAIL_SIZE;
        let url = self
            .build_url(course, w, h)
            .ok_or(ApiError::InvalidRoute(course.id))?;
        self.download(&url, &images.thumbnail)?;

        let (w, h) = DETAIL_SIZE;
        let url = self
            .build_url(course, w, h)
            .ok_or(ApiError::InvalidRoute(course.id))?;
        self.download(&url, &images.detail)?;

        tracing::info!("Generated map images for course {} ({})", course.id, course.name);
        Ok(images)
    }
}

/// Where the images of course `id` live under `out_dir`
pub fn image_paths(id: u32, out_dir: &Path) -> CourseImages {
    CourseImages {
        thumbnail: out_dir
            .join("thumbnails")
            .join(format!("course-{}.png", id)),
        detail: out_dir.join("detail").join(format!("course-{}.png", id)),
    }
}
