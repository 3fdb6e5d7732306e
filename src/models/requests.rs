use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `GET /api/courses`
///
/// Shared by the server (deserialized from the query string) and the client
/// (serialized into it). Absent filters are omitted from the query entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CourseListParams {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl Default for CourseListParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            search: None,
            category: None,
            difficulty: None,
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

/// Query string of `GET /api/recommendations/{course_name}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationParams {
    pub limit: Option<usize>,
}
