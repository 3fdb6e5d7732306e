// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Course, CatalogCourse, ScoredCourse, LearnerPreferences};
pub use requests::{CourseListParams, RecommendationParams};
pub use responses::{CoursePage, CategoriesResponse, DifficultiesResponse, RecommendationsResponse, SimilarCoursesResponse, HealthResponse, ErrorResponse};
