// Core algorithm exports
pub mod filters;
pub mod pagination;
pub mod recommender;
pub mod similarity;

pub use filters::{matches_search, matches_category, matches_difficulty, CourseFilter};
pub use pagination::{page_count, clamp_page, page_bounds};
pub use recommender::{Recommender, RecommenderConfig, Ranked};
pub use similarity::{cosine_similarity, tokenize, TfidfVectorizer};
