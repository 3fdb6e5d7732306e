use serde::{Deserialize, Serialize};
use crate::models::domain::{Course, ScoredCourse};

/// One page of the course listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoursePage<C = Course> {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub courses: Vec<C>,
}

/// Response for `GET /api/categories`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// Response for `GET /api/difficulties`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultiesResponse {
    pub difficulties: Vec<String>,
}

/// Response for the recommendation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse<C = Course> {
    #[serde(default = "Vec::new")]
    pub recommendations: Vec<C>,
}

/// Response for `GET /api/courses/{id}/similar`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarCoursesResponse {
    pub similar_courses: Vec<ScoredCourse>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub courses: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
