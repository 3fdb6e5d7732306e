use crate::explorer::pagination::Pagination;
use crate::models::{Course, CourseListParams};

/// Category option meaning "no category filter"
pub const ALL_CATEGORIES: &str = "All Categories";
/// Level option meaning "no difficulty filter"
pub const ALL_LEVELS: &str = "All Levels";
/// Courses requested per listing page
pub const PAGE_SIZE: u32 = 12;
/// Courses requested for the recommendation panel
pub const RECOMMENDATION_LIMIT: u32 = 4;

/// User-controlled inputs of the course listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub search: String,
    pub category: String,
    pub level: String,
    /// 1-indexed
    pub page: u32,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            level: ALL_LEVELS.to_string(),
            page: 1,
        }
    }
}

impl FilterSelection {
    /// Query for the listing endpoint
    ///
    /// Blank search text and sentinel selections are left out entirely.
    pub fn to_params(&self) -> CourseListParams {
        let search = self.search.trim();
        CourseListParams {
            page: self.page,
            limit: PAGE_SIZE,
            search: (!search.is_empty()).then(|| search.to_string()),
            category: (self.category != ALL_CATEGORIES).then(|| self.category.clone()),
            difficulty: (self.level != ALL_LEVELS).then(|| self.level.clone()),
        }
    }
}

/// Progress of the course listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingStatus {
    /// Nothing requested yet
    Idle,
    Loading,
    Loaded,
    /// The last request failed; the listing is empty
    Failed(String),
}

/// Everything the explorer view renders
///
/// Each response replaces its own section of this record.
#[derive(Debug, Clone)]
pub struct ExplorerState {
    pub filters: FilterSelection,
    /// Category options, sentinel first
    pub categories: Vec<String>,
    /// Difficulty options, sentinel first
    pub levels: Vec<String>,
    pub courses: Vec<Course>,
    pub total: u64,
    pub listing: ListingStatus,
    pub selected: Option<Course>,
    pub recommendations: Vec<Course>,
    pub recommendations_loading: bool,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self {
            filters: FilterSelection::default(),
            categories: with_sentinel(ALL_CATEGORIES, Vec::new()),
            levels: with_sentinel(ALL_LEVELS, Vec::new()),
            courses: Vec::new(),
            total: 0,
            listing: ListingStatus::Idle,
            selected: None,
            recommendations: Vec::new(),
            recommendations_loading: false,
        }
    }
}

impl ExplorerState {
    pub fn pagination(&self) -> Pagination {
        let visible = self.listing == ListingStatus::Loaded && self.total > 0;
        Pagination::new(self.filters.page, self.total, PAGE_SIZE, visible)
    }

    pub fn is_loading(&self) -> bool {
        self.listing == ListingStatus::Loading
    }

    /// Message shown in place of an empty course grid
    pub fn empty_message(&self) -> Option<&'static str> {
        match &self.listing {
            ListingStatus::Loaded if self.courses.is_empty() => Some("No courses found"),
            ListingStatus::Failed(_) => Some("Courses could not be loaded"),
            _ => None,
        }
    }
}

/// Prepend the "show everything" option to a list of labels
pub fn with_sentinel(sentinel: &str, labels: Vec<String>) -> Vec<String> {
    std::iter::once(sentinel.to_string()).chain(labels).collect()
}
