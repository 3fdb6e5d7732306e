use crate::models::{CatalogCourse, CourseListParams};

/// Check whether the course name contains the search text (case-insensitive)
///
/// `needle` must already be lowercased.
#[inline]
pub fn matches_search(course: &CatalogCourse, needle: &str) -> bool {
    course.course.course_name.to_lowercase().contains(needle)
}

/// Check whether the course provider contains the category text (case-insensitive)
///
/// Courses without a provider never match a category filter.
/// `needle` must already be lowercased.
#[inline]
pub fn matches_category(course: &CatalogCourse, needle: &str) -> bool {
    course
        .course_provided
        .as_deref()
        .is_some_and(|provider| provider.to_lowercase().contains(needle))
}

/// Check whether the course has exactly the given difficulty level
#[inline]
pub fn matches_difficulty(course: &CatalogCourse, difficulty: &str) -> bool {
    course.course.difficulty_level.as_deref() == Some(difficulty)
}

/// Listing filter built from the course query parameters
///
/// Empty filter values are treated as absent. All present filters must match.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    search: Option<String>,
    category: Option<String>,
    difficulty: Option<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl CourseFilter {
    pub fn new(search: Option<&str>, category: Option<&str>, difficulty: Option<&str>) -> Self {
        Self {
            search: present(search).map(str::to_lowercase),
            category: present(category).map(str::to_lowercase),
            difficulty: present(difficulty).map(str::to_string),
        }
    }

    pub fn from_params(params: &CourseListParams) -> Self {
        Self::new(
            params.search.as_deref(),
            params.category.as_deref(),
            params.difficulty.as_deref(),
        )
    }

    pub fn matches(&self, course: &CatalogCourse) -> bool {
        if let Some(search) = &self.search {
            if !matches_search(course, search) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !matches_category(course, category) {
                return false;
            }
        }
        if let Some(difficulty) = &self.difficulty {
            if !matches_difficulty(course, difficulty) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Course;

    fn course(name: &str, provider: Option<&str>, level: Option<&str>) -> CatalogCourse {
        let mut course = Course::new(1, name);
        course.difficulty_level = level.map(str::to_string);
        let mut catalog = CatalogCourse::from(course);
        catalog.course_provided = provider.map(str::to_string);
        catalog
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let c = course("Intro to Python", None, None);
        assert!(matches_search(&c, "python"));
        assert!(!matches_search(&c, "rust"));
    }

    #[test]
    fn test_category_is_substring_match() {
        let c = course("ML", Some("Stanford University"), None);
        assert!(matches_category(&c, "stanford"));
        assert!(!matches_category(&course("ML", None, None), "stanford"));
    }

    #[test]
    fn test_difficulty_is_exact() {
        let c = course("ML", None, Some("Beginner"));
        assert!(matches_difficulty(&c, "Beginner"));
        assert!(!matches_difficulty(&c, "beginner"));
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let filter = CourseFilter::new(Some(""), Some(""), None);
        assert!(filter.matches(&course("Anything", None, None)));
    }

    #[test]
    fn test_filters_combine() {
        let filter = CourseFilter::new(Some("data"), Some("ibm"), Some("Advanced"));
        assert!(filter.matches(&course("Data Engineering", Some("IBM"), Some("Advanced"))));
        assert!(!filter.matches(&course("Data Engineering", Some("IBM"), Some("Beginner"))));
        assert!(!filter.matches(&course("Web Design", Some("IBM"), Some("Advanced"))));
    }
}
