//! Course explorer view model
//!
//! Drives the course listing, its filter metadata and the recommendation panel
//! against a [`CourseApi`]. State lives in a `watch` channel so a view can
//! re-render on every change.
//!
//! Each loader owns a request slot. Issuing a request aborts the slot's previous
//! task and bumps its generation; a response is applied only while its
//! generation is still current, checked under the state lock. A late response
//! to a superseded request is therefore never shown.

pub mod pagination;
pub mod state;

pub use pagination::Pagination;
pub use state::{ExplorerState, FilterSelection, ListingStatus, ALL_CATEGORIES, ALL_LEVELS, PAGE_SIZE, RECOMMENDATION_LIMIT};

use crate::models::{Course, CourseListParams};
use crate::services::CourseApi;
use state::with_sentinel;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};

/// Handle to the request (if any) started by an explorer call
///
/// Dropping it does not cancel the request.
#[derive(Debug)]
pub struct Pending {
    handle: Option<JoinHandle<()>>,
}

impl Pending {
    fn idle() -> Self {
        Self { handle: None }
    }

    fn started(handle: JoinHandle<()>) -> Self {
        Self { handle: Some(handle) }
    }

    /// Whether the call issued a network request
    pub fn issued(&self) -> bool {
        self.handle.is_some()
    }

    /// Wait until the request has been applied, discarded or cancelled
    pub async fn settled(self) {
        if let Some(handle) = self.handle {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    tracing::error!("Explorer request task panicked: {}", e);
                }
            }
        }
    }
}

/// Generation counter and current task of one loader
#[derive(Default)]
struct RequestSlot {
    generation: AtomicU64,
    task: Mutex<Option<AbortHandle>>,
}

impl RequestSlot {
    fn lock_task(&self) -> MutexGuard<'_, Option<AbortHandle>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Record the new task, aborting the one it supersedes
    fn replace(task: &mut Option<AbortHandle>, handle: Option<AbortHandle>) {
        if let Some(previous) = std::mem::replace(task, handle) {
            previous.abort();
        }
    }
}

struct Inner {
    api: Arc<dyn CourseApi>,
    state: watch::Sender<ExplorerState>,
    listing: RequestSlot,
    recommendations: RequestSlot,
}

/// Course explorer bound to a course API
///
/// Cheap to clone; clones share state. Must be used inside a tokio runtime.
#[derive(Clone)]
pub struct Explorer {
    inner: Arc<Inner>,
}

impl Explorer {
    pub fn new(api: Arc<dyn CourseApi>) -> Self {
        let (state, _) = watch::channel(ExplorerState::default());
        Self {
            inner: Arc::new(Inner {
                api,
                state,
                listing: RequestSlot::default(),
                recommendations: RequestSlot::default(),
            }),
        }
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<ExplorerState> {
        self.inner.state.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ExplorerState {
        self.inner.state.borrow().clone()
    }

    /// Load filter metadata and the first page
    pub async fn mount(&self) {
        tokio::join!(self.load_filter_options(), self.refresh().settled());
    }

    /// Fetch category and difficulty options
    ///
    /// Each list falls back to just its sentinel when its request fails.
    pub async fn load_filter_options(&self) {
        let api = &self.inner.api;
        let (categories, difficulties) = tokio::join!(api.categories(), api.difficulties());

        let categories = categories.unwrap_or_else(|e| {
            tracing::error!("Error fetching categories: {}", e);
            Vec::new()
        });
        let difficulties = difficulties.unwrap_or_else(|e| {
            tracing::error!("Error fetching difficulties: {}", e);
            Vec::new()
        });

        tracing::debug!(
            "Loaded {} categories and {} difficulty levels",
            categories.len(),
            difficulties.len()
        );

        self.inner.state.send_modify(|state| {
            state.categories = with_sentinel(ALL_CATEGORIES, categories);
            state.levels = with_sentinel(ALL_LEVELS, difficulties);
        });
    }

    /// Re-fetch the current listing page unconditionally
    pub fn refresh(&self) -> Pending {
        self.load_courses(true, |state| state.filters.clone())
    }

    /// Change the search text; returns to the first page
    pub fn set_search(&self, search: impl Into<String>) -> Pending {
        let search = search.into();
        self.load_courses(false, move |state| FilterSelection {
            search,
            page: 1,
            ..state.filters.clone()
        })
    }

    /// Change the category; returns to the first page
    pub fn set_category(&self, category: impl Into<String>) -> Pending {
        let category = category.into();
        self.load_courses(false, move |state| FilterSelection {
            category,
            page: 1,
            ..state.filters.clone()
        })
    }

    /// Change the difficulty level; returns to the first page
    pub fn set_level(&self, level: impl Into<String>) -> Pending {
        let level = level.into();
        self.load_courses(false, move |state| FilterSelection {
            level,
            page: 1,
            ..state.filters.clone()
        })
    }

    /// Jump to a page, clamped to the known page range
    ///
    /// Page navigation does nothing while the pagination controls are hidden,
    /// which includes the time a listing request is in flight.
    pub fn set_page(&self, page: u32) -> Pending {
        self.navigate(move |pagination| Some(pagination.clamp(page)))
    }

    /// Advance one page; does nothing on the last page
    pub fn next_page(&self) -> Pending {
        self.navigate(|pagination| pagination.next_page())
    }

    /// Go back one page; does nothing on the first page
    pub fn previous_page(&self) -> Pending {
        self.navigate(|pagination| pagination.previous_page())
    }

    fn navigate<F>(&self, target: F) -> Pending
    where
        F: FnOnce(&Pagination) -> Option<u32>,
    {
        self.load_courses(false, |state| {
            let pagination = state.pagination();
            let page = pagination
                .visible
                .then(|| target(&pagination))
                .flatten()
                .unwrap_or(state.filters.page);
            FilterSelection {
                page,
                ..state.filters.clone()
            }
        })
    }

    /// Issue a listing request for the filters computed by `next`
    ///
    /// Unless `force` is set, nothing is issued when the filters are unchanged.
    fn load_courses<F>(&self, force: bool, next: F) -> Pending
    where
        F: FnOnce(&ExplorerState) -> FilterSelection,
    {
        let inner = &self.inner;
        let mut task = inner.listing.lock_task();

        let mut issued = None;
        inner.state.send_if_modified(|state| {
            let filters = next(state);
            if !force && filters == state.filters {
                return false;
            }
            state.filters = filters;
            state.listing = ListingStatus::Loading;
            issued = Some((inner.listing.next_generation(), state.filters.to_params()));
            true
        });

        let Some((generation, params)) = issued else {
            return Pending::idle();
        };

        let explorer = self.clone();
        let handle = tokio::spawn(async move {
            explorer.fetch_courses(generation, params).await;
        });
        RequestSlot::replace(&mut task, Some(handle.abort_handle()));
        Pending::started(handle)
    }

    async fn fetch_courses(&self, generation: u64, params: CourseListParams) {
        let result = self.inner.api.courses(&params).await;

        let listing = &self.inner.listing;
        self.inner.state.send_if_modified(|state| {
            if !listing.is_current(generation) {
                tracing::debug!("Discarding stale course page (request {})", generation);
                return false;
            }
            match result {
                Ok(page) => {
                    tracing::debug!(
                        "Applied course page {} ({} courses, {} total)",
                        params.page,
                        page.courses.len(),
                        page.total
                    );
                    state.courses = page.courses;
                    state.total = page.total;
                    state.listing = ListingStatus::Loaded;
                }
                Err(e) => {
                    tracing::error!("Error fetching courses: {}", e);
                    state.courses.clear();
                    state.total = 0;
                    state.listing = ListingStatus::Failed(e.to_string());
                }
            }
            true
        });
    }

    /// Select a course and load courses related to it
    ///
    /// Selecting `None` clears the panel without a network call and cancels any
    /// recommendation request in flight.
    pub fn select_course(&self, course: Option<Course>) -> Pending {
        let inner = &self.inner;
        let mut task = inner.recommendations.lock_task();

        let Some(course) = course else {
            inner.state.send_modify(|state| {
                inner.recommendations.next_generation();
                state.selected = None;
                state.recommendations.clear();
                state.recommendations_loading = false;
            });
            RequestSlot::replace(&mut task, None);
            return Pending::idle();
        };

        let course_name = course.course_name.clone();
        let mut generation = 0;
        inner.state.send_modify(|state| {
            generation = inner.recommendations.next_generation();
            state.selected = Some(course);
            state.recommendations.clear();
            state.recommendations_loading = true;
        });

        let explorer = self.clone();
        let handle = tokio::spawn(async move {
            explorer.fetch_recommendations(generation, course_name).await;
        });
        RequestSlot::replace(&mut task, Some(handle.abort_handle()));
        Pending::started(handle)
    }

    async fn fetch_recommendations(&self, generation: u64, course_name: String) {
        let result = self
            .inner
            .api
            .recommendations(&course_name, RECOMMENDATION_LIMIT)
            .await;

        let slot = &self.inner.recommendations;
        self.inner.state.send_if_modified(|state| {
            if !slot.is_current(generation) {
                tracing::debug!("Discarding stale recommendations for '{}'", course_name);
                return false;
            }
            state.recommendations = result.unwrap_or_else(|e| {
                tracing::error!("Error fetching recommendations for '{}': {}", course_name, e);
                Vec::new()
            });
            state.recommendations_loading = false;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CoursePage;
    use crate::services::ApiError;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Categories,
        Difficulties,
        Courses(CourseListParams),
        Recommendations(String, u32),
    }

    /// Scripted course API
    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<Call>>,
        total: u64,
        fail_metadata: bool,
        fail_courses: bool,
        /// Requests searching for this text wait until notified
        held_search: Option<(String, Arc<Notify>)>,
    }

    impl FakeApi {
        fn with_total(total: u64) -> Self {
            Self { total, ..Default::default() }
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn course_requests(&self) -> Vec<CourseListParams> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    Call::Courses(params) => Some(params),
                    _ => None,
                })
                .collect()
        }

        fn failure() -> ApiError {
            ApiError::Status { status: 500, body: "Course data not loaded".to_string() }
        }
    }

    #[async_trait]
    impl CourseApi for FakeApi {
        async fn categories(&self) -> Result<Vec<String>, ApiError> {
            self.record(Call::Categories);
            if self.fail_metadata {
                return Err(Self::failure());
            }
            Ok(vec!["Coursera".to_string(), "edX".to_string()])
        }

        async fn difficulties(&self) -> Result<Vec<String>, ApiError> {
            self.record(Call::Difficulties);
            if self.fail_metadata {
                return Err(Self::failure());
            }
            Ok(vec!["Beginner".to_string(), "Advanced".to_string()])
        }

        async fn courses(&self, params: &CourseListParams) -> Result<CoursePage, ApiError> {
            self.record(Call::Courses(params.clone()));
            if let Some((held, notify)) = &self.held_search {
                if params.search.as_deref() == Some(held.as_str()) {
                    notify.notified().await;
                }
            }
            if self.fail_courses {
                return Err(Self::failure());
            }

            let label = params.search.clone().unwrap_or_else(|| "Course".to_string());
            let start = (params.page as u64 - 1) * params.limit as u64;
            let count = self.total.saturating_sub(start).min(params.limit as u64);
            let courses = (0..count)
                .map(|i| Course::new(start + i + 1, format!("{} {}", label, start + i + 1)))
                .collect();

            Ok(CoursePage {
                total: self.total,
                page: params.page,
                limit: params.limit,
                courses,
            })
        }

        async fn recommendations(&self, course_name: &str, limit: u32) -> Result<Vec<Course>, ApiError> {
            self.record(Call::Recommendations(course_name.to_string(), limit));
            Ok(vec![Course::new(99, format!("Beyond {}", course_name))])
        }
    }

    fn explorer(api: &Arc<FakeApi>) -> Explorer {
        Explorer::new(api.clone())
    }

    #[tokio::test]
    async fn test_mount_loads_metadata_and_first_page() {
        let api = Arc::new(FakeApi::with_total(30));
        let explorer = explorer(&api);
        explorer.mount().await;

        let state = explorer.snapshot();
        assert_eq!(state.categories, vec![ALL_CATEGORIES, "Coursera", "edX"]);
        assert_eq!(state.levels, vec![ALL_LEVELS, "Beginner", "Advanced"]);
        assert_eq!(state.courses.len(), 12);
        assert_eq!(state.total, 30);
        assert_eq!(state.listing, ListingStatus::Loaded);
        assert_eq!(api.course_requests(), vec![FilterSelection::default().to_params()]);
    }

    #[tokio::test]
    async fn test_failed_metadata_leaves_only_sentinels() {
        let api = Arc::new(FakeApi { fail_metadata: true, ..FakeApi::with_total(5) });
        let explorer = explorer(&api);
        explorer.mount().await;

        let state = explorer.snapshot();
        assert_eq!(state.categories, vec![ALL_CATEGORIES]);
        assert_eq!(state.levels, vec![ALL_LEVELS]);
        assert_eq!(state.listing, ListingStatus::Loaded);
    }

    #[tokio::test]
    async fn test_page_two_of_three() {
        let api = Arc::new(FakeApi::with_total(25));
        let explorer = explorer(&api);
        explorer.mount().await;
        explorer.set_page(2).settled().await;

        let state = explorer.snapshot();
        let pagination = state.pagination();
        assert_eq!(state.courses.len(), 12);
        assert_eq!(pagination.label(), "Page 2 of 3");
        assert!(pagination.visible);
        assert!(pagination.has_previous());
        assert!(pagination.has_next());
    }

    #[tokio::test]
    async fn test_navigation_is_bounded() {
        let api = Arc::new(FakeApi::with_total(25));
        let explorer = explorer(&api);
        explorer.mount().await;

        assert!(!explorer.previous_page().issued());

        explorer.next_page().settled().await;
        explorer.next_page().settled().await;
        assert_eq!(explorer.snapshot().filters.page, 3);
        assert_eq!(explorer.snapshot().courses.len(), 1);

        assert!(!explorer.next_page().issued());
        assert_eq!(explorer.snapshot().filters.page, 3);

        explorer.set_page(40).settled().await;
        assert_eq!(explorer.snapshot().filters.page, 3);

        explorer.previous_page().settled().await;
        assert_eq!(explorer.snapshot().filters.page, 2);
        assert_eq!(api.course_requests().len(), 4);
    }

    #[tokio::test]
    async fn test_navigation_waits_for_pending_listing() {
        let notify = Arc::new(Notify::new());
        let api = Arc::new(FakeApi {
            held_search: Some(("rust".to_string(), notify.clone())),
            ..FakeApi::with_total(100)
        });
        let explorer = explorer(&api);
        explorer.refresh().settled().await;

        let search = explorer.set_search("rust");
        assert!(explorer.snapshot().is_loading());
        assert!(!explorer.next_page().issued());
        assert!(!explorer.set_page(5).issued());
        assert!(!explorer.previous_page().issued());

        notify.notify_one();
        search.settled().await;

        let state = explorer.snapshot();
        assert_eq!(state.filters.page, 1);
        assert_eq!(state.pagination().label(), "Page 1 of 9");
        assert_eq!(api.course_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_sentinel_category_is_not_sent() {
        let api = Arc::new(FakeApi::with_total(5));
        let explorer = explorer(&api);

        explorer.set_category("Coursera").settled().await;
        explorer.set_category(ALL_CATEGORIES).settled().await;

        let requests = api.course_requests();
        assert_eq!(requests[0].category.as_deref(), Some("Coursera"));
        assert_eq!(requests[1].category, None);
    }

    #[tokio::test]
    async fn test_filter_change_returns_to_first_page() {
        let api = Arc::new(FakeApi::with_total(50));
        let explorer = explorer(&api);
        explorer.mount().await;
        explorer.set_page(3).settled().await;

        explorer.set_level("Beginner").settled().await;

        let last = api.course_requests().pop().unwrap();
        assert_eq!(last.page, 1);
        assert_eq!(last.difficulty.as_deref(), Some("Beginner"));
    }

    #[tokio::test]
    async fn test_unchanged_filters_issue_nothing() {
        let api = Arc::new(FakeApi::with_total(5));
        let explorer = explorer(&api);
        explorer.set_search("rust").settled().await;

        assert!(!explorer.set_search("rust").issued());
        assert_eq!(api.course_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_superseded_listing_is_never_applied() {
        let notify = Arc::new(Notify::new());
        let api = Arc::new(FakeApi {
            held_search: Some(("slow".to_string(), notify.clone())),
            ..FakeApi::with_total(3)
        });
        let explorer = explorer(&api);

        let slow = explorer.set_search("slow");
        tokio::task::yield_now().await;
        explorer.set_search("fast").settled().await;

        notify.notify_one();
        slow.settled().await;

        let state = explorer.snapshot();
        assert_eq!(state.filters.search, "fast");
        assert_eq!(state.courses[0].course_name, "fast 1");
        assert_eq!(state.listing, ListingStatus::Loaded);
    }

    #[tokio::test]
    async fn test_stale_generation_response_is_discarded() {
        let api = Arc::new(FakeApi::with_total(5));
        let explorer = explorer(&api);
        explorer.refresh().settled().await;
        let mut updates = explorer.subscribe();
        updates.borrow_and_update();

        let stale = explorer.inner.listing.next_generation() - 1;
        let params = CourseListParams {
            search: Some("stale".to_string()),
            ..FilterSelection::default().to_params()
        };
        explorer.fetch_courses(stale, params.clone()).await;

        assert!(!updates.has_changed().unwrap());
        assert_eq!(explorer.snapshot().courses[0].course_name, "Course 1");

        let current = stale + 1;
        explorer.fetch_courses(current, params).await;
        assert_eq!(explorer.snapshot().courses[0].course_name, "stale 1");
    }

    #[tokio::test]
    async fn test_failed_listing_is_distinct_from_empty() {
        let api = Arc::new(FakeApi { fail_courses: true, ..FakeApi::with_total(5) });
        let explorer = explorer(&api);
        explorer.refresh().settled().await;

        let state = explorer.snapshot();
        assert!(state.courses.is_empty());
        assert_eq!(state.total, 0);
        assert!(matches!(state.listing, ListingStatus::Failed(_)));
        assert_eq!(state.empty_message(), Some("Courses could not be loaded"));
        assert!(!state.pagination().visible);
    }

    #[tokio::test]
    async fn test_select_and_deselect_course() {
        let api = Arc::new(FakeApi::with_total(5));
        let explorer = explorer(&api);

        explorer
            .select_course(Some(Course::new(1, "Intro to Python")))
            .settled()
            .await;

        let state = explorer.snapshot();
        assert_eq!(state.recommendations, vec![Course::new(99, "Beyond Intro to Python")]);
        assert!(!state.recommendations_loading);
        assert_eq!(
            api.calls(),
            vec![Call::Recommendations("Intro to Python".to_string(), RECOMMENDATION_LIMIT)]
        );

        let pending = explorer.select_course(None);
        assert!(!pending.issued());

        let state = explorer.snapshot();
        assert!(state.selected.is_none());
        assert!(state.recommendations.is_empty());
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let api = Arc::new(FakeApi::with_total(5));
        let explorer = explorer(&api);
        let mut updates = explorer.subscribe();

        explorer.refresh().settled().await;

        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().total, 5);
    }
}
