use crate::core::{page_bounds, CourseFilter, Ranked, Recommender, RecommenderConfig};
use crate::models::{CatalogCourse, CourseListParams, CoursePage, LearnerPreferences, ScoredCourse};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or querying the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Course not found: {0}")]
    NotFound(String),
}

/// In-memory course catalog
///
/// Loaded once at startup and read-only afterwards. Holds:
/// - the course records, in file order
/// - the distinct category and difficulty labels
/// - the content-based recommender fitted on the records
pub struct CourseCatalog {
    courses: Vec<CatalogCourse>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<u64, usize>,
    categories: Vec<String>,
    difficulties: Vec<String>,
    recommender: Recommender,
}

impl CourseCatalog {
    /// Build a catalog from records
    pub fn new(courses: Vec<CatalogCourse>, config: RecommenderConfig) -> Self {
        let mut by_name = HashMap::with_capacity(courses.len());
        let mut by_id = HashMap::with_capacity(courses.len());
        for (index, course) in courses.iter().enumerate() {
            by_name.entry(course.course.course_name.clone()).or_insert(index);
            by_id.entry(course.course.id).or_insert(index);
        }

        let categories = distinct(courses.iter().map(|c| c.course_provided.as_deref()));
        let difficulties = distinct(courses.iter().map(|c| c.course.difficulty_level.as_deref()));

        let documents: Vec<String> = courses.iter().map(CatalogCourse::document).collect();
        let recommender = Recommender::fit(&documents, config);

        tracing::debug!(
            "Catalog built: {} courses, {} categories, {} difficulties",
            courses.len(),
            categories.len(),
            difficulties.len()
        );

        Self {
            courses,
            by_name,
            by_id,
            categories,
            difficulties,
            recommender,
        }
    }

    /// Parse a JSON array of course records
    pub fn from_json(json: &str, config: RecommenderConfig) -> Result<Self, CatalogError> {
        let courses: Vec<CatalogCourse> = serde_json::from_str(json)?;
        Ok(Self::new(courses, config))
    }

    /// Load the catalog from a JSON data file
    pub async fn load<P: AsRef<Path>>(path: P, config: RecommenderConfig) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json(&json, config)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Distinct provider labels in first-seen order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Distinct difficulty labels in first-seen order
    pub fn difficulties(&self) -> &[String] {
        &self.difficulties
    }

    /// Filter and paginate the catalog
    pub fn query(&self, params: &CourseListParams) -> CoursePage<CatalogCourse> {
        let filter = CourseFilter::from_params(params);
        let matching: Vec<&CatalogCourse> = self
            .courses
            .iter()
            .filter(|course| filter.matches(course))
            .collect();

        let bounds = page_bounds(params.page, params.limit, matching.len());
        let courses = matching[bounds].iter().map(|c| (*c).clone()).collect();

        CoursePage {
            total: matching.len() as u64,
            page: params.page,
            limit: params.limit,
            courses,
        }
    }

    /// Look up a course by its exact name
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogCourse> {
        self.by_name.get(name).map(|&index| &self.courses[index])
    }

    pub fn find_by_id(&self, id: u64) -> Option<&CatalogCourse> {
        self.by_id.get(&id).map(|&index| &self.courses[index])
    }

    /// Courses similar to the named course, most similar first
    pub fn similar_by_name(&self, name: &str, limit: usize) -> Result<Vec<CatalogCourse>, CatalogError> {
        let index = *self
            .by_name
            .get(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;

        Ok(self
            .recommender
            .similar_to(index, limit)
            .into_iter()
            .map(|ranked| self.courses[ranked.index].clone())
            .collect())
    }

    /// Courses similar to the course with the given id, with their scores
    pub fn similar_by_id(&self, id: u64, limit: usize) -> Result<Vec<ScoredCourse>, CatalogError> {
        let index = *self
            .by_id
            .get(&id)
            .ok_or_else(|| CatalogError::NotFound(format!("course id {}", id)))?;

        Ok(self.scored(self.recommender.similar_to(index, limit)))
    }

    /// Courses matching free-text learner preferences, with their scores
    pub fn recommend_for(&self, preferences: &LearnerPreferences, limit: usize) -> Vec<ScoredCourse> {
        self.scored(self.recommender.rank_text(&preferences.query_text(), limit))
    }

    fn scored(&self, ranked: Vec<Ranked>) -> Vec<ScoredCourse> {
        ranked
            .into_iter()
            .map(|r| ScoredCourse {
                course: self.courses[r.index].clone(),
                similarity_score: r.score,
            })
            .collect()
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .flatten()
        .filter(|value| !value.is_empty())
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
