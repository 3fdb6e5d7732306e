// Unit tests for the core algorithms

use course_compass::core::{
    clamp_page, cosine_similarity, page_bounds, page_count, tokenize, CourseFilter, Recommender,
    RecommenderConfig, TfidfVectorizer,
};
use course_compass::models::{CatalogCourse, Course};

fn create_course(id: u64, name: &str, provider: &str, level: &str) -> CatalogCourse {
    let mut course = Course::new(id, name);
    course.difficulty_level = Some(level.to_string());
    let mut catalog = CatalogCourse::from(course);
    catalog.course_provided = Some(provider.to_string());
    catalog
}

#[test]
fn test_page_count_matches_ceiling() {
    for total in 0..200u64 {
        let expected = (total as f64 / 12.0).ceil() as u32;
        assert_eq!(page_count(total, 12), expected);
    }
}

#[test]
fn test_page_bounds_never_exceed_limit() {
    for len in 0..40usize {
        for page in 1..6u32 {
            let bounds = page_bounds(page, 12, len);
            assert!(bounds.end - bounds.start <= 12);
            assert!(bounds.end <= len);
        }
    }
}

#[test]
fn test_clamp_page_stays_in_range() {
    for total_pages in 0..5u32 {
        for page in 0..10u32 {
            let clamped = clamp_page(page, total_pages);
            assert!(clamped >= 1);
            assert!(clamped <= total_pages.max(1));
        }
    }
}

#[test]
fn test_filter_matches_all_when_empty() {
    let filter = CourseFilter::default();
    assert!(filter.matches(&create_course(1, "Anything", "Anyone", "Beginner")));
}

#[test]
fn test_filter_difficulty_requires_exact_level() {
    let filter = CourseFilter::new(None, None, Some("Advanced"));
    assert!(filter.matches(&create_course(1, "ML", "Stanford", "Advanced")));
    assert!(!filter.matches(&create_course(2, "ML", "Stanford", "Conversant")));
}

#[test]
fn test_tokenize_handles_punctuation() {
    assert_eq!(tokenize("C++/Rust: Systems-Programming"), vec!["rust", "systems", "programming"]);
}

#[test]
fn test_cosine_of_disjoint_vectors() {
    let docs = vec!["alpha beta".to_string(), "gamma delta".to_string()];
    let vectorizer = TfidfVectorizer::fit(&docs, 100);
    let a = vectorizer.transform(&docs[0]);
    let b = vectorizer.transform(&docs[1]);
    assert_eq!(cosine_similarity(&a, &b), 0.0);
}

#[test]
fn test_recommender_never_returns_query_course() {
    let docs: Vec<String> = (0..20)
        .map(|i| format!("course topic{} shared words", i % 4))
        .collect();
    let recommender = Recommender::fit(&docs, RecommenderConfig::default());

    for index in 0..docs.len() {
        let results = recommender.similar_to(index, 5);
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.index != index));
    }
}

#[test]
fn test_recommender_prefers_identical_documents() {
    let docs: Vec<String> = vec![
        "rust ownership borrowing".to_string(),
        "python scripting".to_string(),
        "rust ownership borrowing".to_string(),
    ];
    let recommender = Recommender::fit(&docs, RecommenderConfig::default());
    let results = recommender.similar_to(0, 1);
    assert_eq!(results[0].index, 2);
    assert!((results[0].score - 1.0).abs() < 1e-9);
}
