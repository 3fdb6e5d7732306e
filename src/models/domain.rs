use serde::{Deserialize, Serialize};

/// A single course as exposed by the course API
///
/// Only `id` and `course_name` are guaranteed; the upstream dataset is
/// inconsistently populated, so everything else is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub course_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub course_rating: Option<f64>,
    #[serde(default)]
    pub course_rated_by: Option<u64>,
    #[serde(default)]
    pub course_duration: Option<String>,
    #[serde(default)]
    pub course_enrollment: Option<u64>,
}

impl Course {
    pub fn new(id: u64, course_name: impl Into<String>) -> Self {
        Self {
            id,
            course_name: course_name.into(),
            url: None,
            difficulty_level: None,
            course_rating: None,
            course_rated_by: None,
            course_duration: None,
            course_enrollment: None,
        }
    }
}

/// Catalog record held by the server
///
/// Serialized flat: clients that only know [`Course`] ignore the extra fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCourse {
    #[serde(flatten)]
    pub course: Course,
    /// Provider label, used as the course category
    #[serde(default)]
    pub course_provided: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CatalogCourse {
    /// Text the recommender indexes for this course
    pub fn document(&self) -> String {
        let mut parts: Vec<&str> = vec![self.course.course_name.as_str()];
        if let Some(provider) = &self.course_provided {
            parts.push(provider);
        }
        if let Some(level) = &self.course.difficulty_level {
            parts.push(level);
        }
        parts.extend(self.skills.iter().map(String::as_str));
        if let Some(description) = &self.description {
            parts.push(description);
        }
        parts.join(" ").to_lowercase()
    }
}

impl From<Course> for CatalogCourse {
    fn from(course: Course) -> Self {
        Self {
            course,
            course_provided: None,
            skills: Vec::new(),
            description: None,
        }
    }
}

/// Catalog record annotated with its similarity to a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCourse {
    #[serde(flatten)]
    pub course: CatalogCourse,
    pub similarity_score: f64,
}

/// Free-text learner preferences for preference-based recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerPreferences {
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub goals: String,
    #[serde(default = "default_level")]
    pub level: String,
}

impl LearnerPreferences {
    /// Query text fed to the recommender
    pub fn query_text(&self) -> String {
        [self.interests.as_str(), self.goals.as_str(), self.level.as_str()]
            .join(" ")
            .to_lowercase()
    }
}

fn default_level() -> String {
    "beginner".to_string()
}
