// Service exports
pub mod api_client;
pub mod cache;
pub mod catalog;

pub use api_client::{ApiClient, ApiError, CourseApi};
pub use cache::{RecommendationCache, CacheKey, CacheStats};
pub use catalog::{CourseCatalog, CatalogError};
