use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl Geolocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_nan(&self) -> bool {
        self.latitude.is_nan() || self.longitude.is_nan()
    }
}

/// A single named point along a course (departure, via point, arrival, ...)
///
/// Wire shape: `{"type": "...", "name": "...", "geolocation": {"latitude": .., "longitude": ..}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(rename = "name")]
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "geolocation")]
    pub position: Geolocation,
}

impl Waypoint {
    pub fn new(label: impl Into<String>, kind: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            label: label.into(),
            kind: kind.into(),
            position: Geolocation::new(latitude, longitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.position.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.position.longitude
    }
}

/// The five characteristic scores of a course, each on a 0-10 scale
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseRatings {
    #[serde(default)]
    pub tech: u8,
    #[serde(default)]
    pub speed: u8,
    #[serde(default)]
    pub scenery: u8,
    #[serde(default)]
    pub road: u8,
    #[serde(default)]
    pub access: u8,
}

impl CourseRatings {
    /// Arithmetic mean of the five scores
    pub fn average(&self) -> f64 {
        let sum = self.tech as u32
            + self.speed as u32
            + self.scenery as u32
            + self.road as u32
            + self.access as u32;
        sum as f64 / 5.0
    }
}

/// A curated driving course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub characteristics: String,
    /// Ordered route, first entry is the departure point
    #[serde(default, deserialize_with = "nullable_vec")]
    pub nav: Vec<Waypoint>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub styles: Vec<String>,
    #[serde(default)]
    pub ratings: CourseRatings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naver_map_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_image: Option<String>,
}

impl Course {
    pub fn has_route(&self) -> bool {
        !self.nav.is_empty()
    }

    pub fn has_style(&self, style: &str) -> bool {
        self.styles.iter().any(|s| s == style)
    }
}

/// Go-style backends encode empty slices as `null`
pub(crate) fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_course() {
        let json = r#"{
            "id": 3,
            "name": "Misiryeong",
            "region": "Gangwon",
            "tagline": "Old pass road",
            "characteristics": "Hairpins",
            "nav": [
                {"type": "start", "name": "Yongdae-ri", "geolocation": {"latitude": 38.21, "longitude": 128.37}},
                {"type": "end", "name": "Sokcho", "geolocation": {"latitude": 38.20, "longitude": 128.59}}
            ],
            "notes": "",
            "styles": ["hairpin", "scenic"],
            "ratings": {"tech": 8, "speed": 5, "scenery": 9, "road": 7, "access": 6},
            "naverMapUrl": "https://map.naver.com/p/directions"
        }"#;

        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.id, 3);
        assert_eq!(course.nav.len(), 2);
        assert_eq!(course.nav[0].label, "Yongdae-ri");
        assert_eq!(course.nav[0].kind, "start");
        assert_eq!(course.nav[1].latitude(), 38.20);
        assert!(course.has_style("scenic"));
        assert!(!course.has_style("highspeed"));
        assert_eq!(
            course.naver_map_url.as_deref(),
            Some("https://map.naver.com/p/directions")
        );
        assert_eq!(course.detail_image, None);
    }

    #[test]
    fn test_parse_course_null_lists() {
        let json = r#"{"id": 1, "name": "Empty", "nav": null, "styles": null}"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert!(course.nav.is_empty());
        assert!(course.styles.is_empty());
        assert!(!course.has_route());
        assert_eq!(course.ratings, CourseRatings::default());
    }

    #[test]
    fn test_ratings_average() {
        let ratings = CourseRatings {
            tech: 8,
            speed: 5,
            scenery: 9,
            road: 7,
            access: 6,
        };
        assert!((ratings.average() - 7.0).abs() < 1e-9);
    }
}
