use super::Course;

/// Filters the course API applies server-side
///
/// An empty value (or `"all"` for region and style) disables that filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilters {
    pub region: String,
    pub style: String,
    pub search: String,
}

impl CourseFilters {
    /// True when no filter would exclude anything
    pub fn is_empty(&self) -> bool {
        !is_active(&self.region) && !is_active(&self.style) && self.search.is_empty()
    }

    /// Query parameters for `GET /courses`, omitting empty values
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("region", self.region.as_str()),
            ("style", self.style.as_str()),
            ("search", self.search.as_str()),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .collect()
    }

    pub fn matches(&self, course: &Course) -> bool {
        if is_active(&self.region) && course.region != self.region {
            return false;
        }

        if is_active(&self.style) && !course.has_style(&self.style) {
            return false;
        }

        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let hit = [
                &course.name,
                &course.tagline,
                &course.characteristics,
                &course.region,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, courses: impl IntoIterator<Item = &'a Course>) -> Vec<Course> {
        courses
            .into_iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect()
    }
}

fn is_active(value: &str) -> bool {
    !value.is_empty() && value != "all"
}

/// Inclusive range on a course's average rating, applied client-side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingRange {
    pub min: f64,
    pub max: f64,
}

impl Default for RatingRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10.0,
        }
    }
}

impl RatingRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The full 0-10 range lets every course through
    pub fn is_unbounded(&self) -> bool {
        *self == Self::default()
    }

    pub fn contains(&self, course: &Course) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let avg = course.ratings.average();
        avg >= self.min && avg <= self.max
    }

    pub fn retain(&self, courses: &mut Vec<Course>) {
        if self.is_unbounded() {
            return;
        }
        courses.retain(|c| self.contains(c));
    }
}
