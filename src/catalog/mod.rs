//! Where courses come from: the REST API or a local JSON catalog

use std::path::Path;

use crate::api::ApiClient;
use crate::domain::{Course, CourseFilters, Recommendation, RecommendationRecord};
use crate::error::{ApiError, Result};

pub const COURSES_FILE: &str = "courses.json";
pub const RECOMMENDATIONS_FILE: &str = "recommendations.json";

/// Read access to courses and recommendations
pub trait CourseSource {
    fn courses(&self, filters: &CourseFilters) -> Result<Vec<Course>>;
    fn course(&self, id: u32) -> Result<Course>;
    fn recommendations(&self) -> Result<Vec<Recommendation>>;
    fn recommendation(&self, id: u32) -> Result<Recommendation>;
}

impl CourseSource for ApiClient {
    fn courses(&self, filters: &CourseFilters) -> Result<Vec<Course>> {
        self.get_courses(filters)
    }

    fn course(&self, id: u32) -> Result<Course> {
        self.get_course(id)
    }

    fn recommendations(&self) -> Result<Vec<Recommendation>> {
        self.get_recommendations()
    }

    fn recommendation(&self, id: u32) -> Result<Recommendation> {
        self.get_recommendation(id)
    }
}

/// Courses and recommendations loaded from a directory of JSON files
///
/// `courses.json` holds an array of courses. `recommendations.json` is
/// optional and references courses through `courseIds`.
#[derive(Debug, Clone, Default)]
pub struct LocalCatalog {
    courses: Vec<Course>,
    recommendations: Vec<RecommendationRecord>,
}

impl LocalCatalog {
    pub fn new(courses: Vec<Course>, recommendations: Vec<RecommendationRecord>) -> Self {
        Self {
            courses,
            recommendations,
        }
    }

    pub fn load(dir: &Path) -> Result<Self> {
        let courses: Vec<Course> = read_json(&dir.join(COURSES_FILE))?;

        let rec_path = dir.join(RECOMMENDATIONS_FILE);
        let recommendations: Vec<RecommendationRecord> = if rec_path.exists() {
            read_json(&rec_path)?
        } else {
            Vec::new()
        };

        tracing::debug!(
            "Loaded {} courses and {} recommendations from {}",
            courses.len(),
            recommendations.len(),
            dir.display()
        );
        Ok(Self::new(courses, recommendations))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(|source| ApiError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ApiError::Parse {
        path: path.display().to_string(),
        source,
    })
}

impl CourseSource for LocalCatalog {
    fn courses(&self, filters: &CourseFilters) -> Result<Vec<Course>> {
        Ok(filters.apply(&self.courses))
    }

    fn course(&self, id: u32) -> Result<Course> {
        self.courses
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(ApiError::NotFound { what: "course", id })
    }

    fn recommendations(&self) -> Result<Vec<Recommendation>> {
        Ok(self
            .recommendations
            .iter()
            .map(|r| r.resolve(&self.courses))
            .collect())
    }

    fn recommendation(&self, id: u32) -> Result<Recommendation> {
        self.recommendations
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.resolve(&self.courses))
            .ok_or(ApiError::NotFound {
                what: "recommendation",
                id,
            })
    }
}
