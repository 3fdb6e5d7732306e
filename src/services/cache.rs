use crate::models::CatalogCourse;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// In-memory cache for recommendation results
///
/// The catalog is immutable once loaded, so entries only expire by TTL or
/// capacity eviction.
pub struct RecommendationCache {
    entries: moka::future::Cache<String, Arc<Vec<CatalogCourse>>>,
    ttl_secs: u64,
}

impl RecommendationCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries, ttl_secs }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Vec<CatalogCourse>>> {
        let hit = self.entries.get(key).await;
        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        } else {
            tracing::trace!("Cache miss: {}", key);
        }
        hit
    }

    pub async fn set(&self, key: &str, value: Arc<Vec<CatalogCourse>>) {
        self.entries.insert(key.to_string(), value).await;
        tracing::trace!("Cache set: {}", key);
    }

    pub async fn invalidate_all(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
        tracing::debug!("Recommendation cache cleared");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.entries.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entry_count: u64,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for name-based recommendations
    pub fn recommendations(course_name: &str, limit: usize) -> String {
        format!("recommendations:{}:{}", limit, course_name)
    }
}
