//! Course Compass - course catalog service and course explorer client
//!
//! The library has two halves:
//! - the catalog service: an in-memory course catalog with filtered
//!   pagination and content-based recommendations, served over HTTP
//! - the explorer: a client-side view model that drives listing, filter
//!   metadata and recommendation requests against that API

pub mod config;
pub mod core;
pub mod explorer;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{Recommender, RecommenderConfig, page_count};
pub use explorer::{Explorer, ExplorerState, Pagination, Pending};
pub use models::{Course, CatalogCourse, CoursePage, CourseListParams};
pub use services::{ApiClient, ApiError, CourseApi, CourseCatalog};
