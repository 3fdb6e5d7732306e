use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::RecommendationSettings;
use crate::models::{CategoriesResponse, CourseListParams, DifficultiesResponse, ErrorResponse, HealthResponse, LearnerPreferences, RecommendationParams, RecommendationsResponse, SimilarCoursesResponse};
use crate::services::{CacheKey, CatalogError, CourseCatalog, RecommendationCache};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// `None` when the catalog failed to load; `/api` then answers 500
    pub catalog: Option<Arc<CourseCatalog>>,
    pub cache: Arc<RecommendationCache>,
    pub recommendations: RecommendationSettings,
}

/// Configure all course-related routes under `/api`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/categories", web::get().to(get_categories))
        .route("/difficulties", web::get().to(get_difficulties))
        .route("/courses", web::get().to(list_courses))
        .route("/courses/{id}/similar", web::get().to(similar_courses))
        .route("/recommendations", web::post().to(recommend_for_preferences))
        .route("/recommendations/{course_name}", web::get().to(get_recommendations));
}

/// Root endpoint
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Course Recommendation API",
    }))
}

/// Health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (status, courses) = match &state.catalog {
        Some(catalog) => ("healthy", catalog.len()),
        None => ("degraded", 0),
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        courses,
    })
}

fn error_response(status: u16, error: &str, message: String) -> HttpResponse {
    let body = ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status,
    };
    match status {
        400 => HttpResponse::BadRequest().json(body),
        404 => HttpResponse::NotFound().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

/// The loaded catalog, or the 500 response to send when there is none
fn loaded_catalog(state: &AppState) -> Result<&CourseCatalog, HttpResponse> {
    state.catalog.as_deref().ok_or_else(|| {
        error_response(
            500,
            "Course data not loaded",
            "The course catalog is unavailable".to_string(),
        )
    })
}

/// List distinct categories
///
/// GET /api/categories
async fn get_categories(state: web::Data<AppState>) -> impl Responder {
    let catalog = match loaded_catalog(&state) {
        Ok(catalog) => catalog,
        Err(response) => return response,
    };

    HttpResponse::Ok().json(CategoriesResponse {
        categories: catalog.categories().to_vec(),
    })
}

/// List distinct difficulty levels
///
/// GET /api/difficulties
async fn get_difficulties(state: web::Data<AppState>) -> impl Responder {
    let catalog = match loaded_catalog(&state) {
        Ok(catalog) => catalog,
        Err(response) => return response,
    };

    HttpResponse::Ok().json(DifficultiesResponse {
        difficulties: catalog.difficulties().to_vec(),
    })
}

/// Filtered, paginated course listing
///
/// GET /api/courses?search=&category=&difficulty=&page=1&limit=10
async fn list_courses(
    state: web::Data<AppState>,
    query: web::Query<CourseListParams>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for list_courses request: {:?}", errors);
        return error_response(400, "Validation failed", errors.to_string());
    }

    let catalog = match loaded_catalog(&state) {
        Ok(catalog) => catalog,
        Err(response) => return response,
    };

    let page = catalog.query(&query);

    tracing::debug!(
        "Listing page {} ({} of {} matching courses)",
        page.page,
        page.courses.len(),
        page.total
    );

    HttpResponse::Ok().json(page)
}

/// Courses similar to a named course
///
/// GET /api/recommendations/{course_name}?limit=6
async fn get_recommendations(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<RecommendationParams>,
) -> impl Responder {
    let catalog = match loaded_catalog(&state) {
        Ok(catalog) => catalog,
        Err(response) => return response,
    };

    let course_name = path.into_inner();
    let limit = query
        .limit
        .unwrap_or(state.recommendations.default_limit)
        .min(state.recommendations.max_limit);

    let key = CacheKey::recommendations(&course_name, limit);
    if let Some(cached) = state.cache.get(&key).await {
        return HttpResponse::Ok().json(RecommendationsResponse {
            recommendations: cached.as_ref().clone(),
        });
    }

    match catalog.similar_by_name(&course_name, limit) {
        Ok(recommendations) => {
            tracing::info!(
                "Returning {} recommendations for '{}'",
                recommendations.len(),
                course_name
            );
            state.cache.set(&key, Arc::new(recommendations.clone())).await;
            HttpResponse::Ok().json(RecommendationsResponse { recommendations })
        }
        Err(e @ CatalogError::NotFound(_)) => error_response(
            404,
            "Course not found",
            e.to_string(),
        ),
        Err(e) => {
            tracing::error!("Failed to generate recommendations for '{}': {}", course_name, e);
            error_response(500, "Failed to generate recommendations", e.to_string())
        }
    }
}

/// Recommendations for free-text learner preferences
///
/// POST /api/recommendations
///
/// Request body:
/// ```json
/// {
///   "interests": "string",
///   "goals": "string",
///   "level": "beginner"
/// }
/// ```
async fn recommend_for_preferences(
    state: web::Data<AppState>,
    req: web::Json<LearnerPreferences>,
) -> impl Responder {
    let catalog = match loaded_catalog(&state) {
        Ok(catalog) => catalog,
        Err(response) => return response,
    };

    let recommendations = catalog.recommend_for(&req, state.recommendations.preference_limit);

    tracing::info!(
        "Returning {} preference recommendations (level: {})",
        recommendations.len(),
        req.level
    );

    HttpResponse::Ok().json(RecommendationsResponse { recommendations })
}

/// Courses similar to a course id, with scores
///
/// GET /api/courses/{id}/similar
async fn similar_courses(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> impl Responder {
    let catalog = match loaded_catalog(&state) {
        Ok(catalog) => catalog,
        Err(response) => return response,
    };

    let id = path.into_inner();
    match catalog.similar_by_id(id, state.recommendations.similar_limit) {
        Ok(similar_courses) => HttpResponse::Ok().json(SimilarCoursesResponse { similar_courses }),
        Err(e) => error_response(404, "Course not found", e.to_string()),
    }
}
