use crate::config::ClientSettings;
use crate::models::{CategoriesResponse, Course, CourseListParams, CoursePage, DifficultiesResponse, RecommendationsResponse};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the course API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Read operations the course explorer needs from the course API
#[async_trait]
pub trait CourseApi: Send + Sync {
    /// `GET /api/categories`
    async fn categories(&self) -> Result<Vec<String>, ApiError>;

    /// `GET /api/difficulties`
    async fn difficulties(&self) -> Result<Vec<String>, ApiError>;

    /// `GET /api/courses`
    async fn courses(&self, params: &CourseListParams) -> Result<CoursePage, ApiError>;

    /// `GET /api/recommendations/{course_name}`
    async fn recommendations(&self, course_name: &str, limit: u32) -> Result<Vec<Course>, ApiError>;
}

/// HTTP client for the course API
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a client for the API at `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { base_url, client })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ApiError> {
        Self::new(
            settings.base_url.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode a JSON body from a successful response
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl CourseApi for ApiClient {
    async fn categories(&self) -> Result<Vec<String>, ApiError> {
        let url = self.url("/api/categories");
        tracing::debug!("Fetching categories from: {}", url);

        let response: CategoriesResponse = self.fetch(self.client.get(&url)).await?;
        Ok(response.categories)
    }

    async fn difficulties(&self) -> Result<Vec<String>, ApiError> {
        let url = self.url("/api/difficulties");
        tracing::debug!("Fetching difficulties from: {}", url);

        let response: DifficultiesResponse = self.fetch(self.client.get(&url)).await?;
        Ok(response.difficulties)
    }

    async fn courses(&self, params: &CourseListParams) -> Result<CoursePage, ApiError> {
        let url = self.url("/api/courses");
        tracing::debug!("Fetching courses: page={}, limit={}", params.page, params.limit);

        self.fetch(self.client.get(&url).query(params)).await
    }

    async fn recommendations(&self, course_name: &str, limit: u32) -> Result<Vec<Course>, ApiError> {
        let url = self.url(&format!(
            "/api/recommendations/{}",
            urlencoding::encode(course_name)
        ));
        tracing::debug!("Fetching recommendations from: {}", url);

        let response: RecommendationsResponse = self
            .fetch(self.client.get(&url).query(&[("limit", limit)]))
            .await?;
        Ok(response.recommendations)
    }
}
