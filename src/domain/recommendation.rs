use serde::{Deserialize, Serialize};

use super::Course;
use super::course::nullable_vec;

/// An editorial bundle of courses sharing a theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub courses: Vec<Course>,
}

/// Stored form of a recommendation, referencing courses by id
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRecord {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub course_ids: Vec<u32>,
}

impl RecommendationRecord {
    /// Resolve course ids against `courses`, skipping ids that do not exist
    pub fn resolve(&self, courses: &[Course]) -> Recommendation {
        let resolved = self
            .course_ids
            .iter()
            .filter_map(|id| courses.iter().find(|c| c.id == *id).cloned())
            .collect();

        Recommendation {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            courses: resolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: u32) -> Course {
        serde_json::from_str(&format!(r#"{{"id": {id}, "name": "Course {id}"}}"#)).unwrap()
    }

    #[test]
    fn test_parse_recommendation() {
        let json = r#"{"id": 2, "title": "Hairpin heaven", "description": "Tight corners", "courses": null}"#;
        let rec: Recommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, 2);
        assert_eq!(rec.title, "Hairpin heaven");
        assert!(rec.courses.is_empty());
    }

    #[test]
    fn test_resolve_keeps_order_and_skips_unknown() {
        let record = RecommendationRecord {
            id: 1,
            title: "Coastal".to_string(),
            description: String::new(),
            course_ids: vec![3, 99, 1],
        };
        let courses = vec![course(1), course(2), course(3)];

        let rec = record.resolve(&courses);
        let ids: Vec<u32> = rec.courses.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
