//! Resource Views
//!
//! Each view owns its state, fetches when activated and exposes its own
//! mutations. Views never talk to each other; they share only the
//! [`ViewContext`].
//!
//! ## Failure policy
//!
//! - Reads: logged, previous state kept, message kept in `last_error()`
//! - Mutations: logged, state untouched, error returned to the caller
//! - Nothing is retried or rolled back

mod analytics;
mod chart;
mod dashboard;
mod event_create;
mod event_detail;
mod events_list;

pub use analytics::{AnalyticsSummary, AnalyticsView};
pub use chart::{AxisRange, DualAxisChart, Series};
pub use dashboard::DashboardSummary;
pub use event_create::{EventCreate, EventForm};
pub use event_detail::EventDetail;
pub use events_list::EventsList;

use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiError, Event, EventAnalytics, EventsApi};
use crate::fetch::{Coalescer, Fetched, ResourceKey, ViewScope};
use crate::session::SessionHandle;

/// Errors returned by view mutations
#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Not logged in")]
    NoSession,

    #[error("View closed before the request finished")]
    TornDown,

    #[error("{0} is required")]
    MissingField(&'static str),
}

/// How an activation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Loaded,
    /// No session yet; nothing was requested
    NoSession,
    /// The request failed; previous state kept
    Failed,
    /// The view was torn down; the response was discarded
    TornDown,
}

/// In-flight request tables, one per resource type
#[derive(Default)]
struct Resources {
    events: Coalescer<Vec<Event>>,
    event: Coalescer<Event>,
    analytics: Coalescer<EventAnalytics>,
}

/// Everything a view needs: session, API and shared request tables
#[derive(Clone)]
pub struct ViewContext {
    session: SessionHandle,
    api: Arc<dyn EventsApi>,
    resources: Arc<Resources>,
    root: CancellationToken,
}

impl ViewContext {
    pub fn new(session: SessionHandle, api: Arc<dyn EventsApi>) -> Self {
        Self {
            session,
            api,
            resources: Arc::new(Resources::default()),
            root: CancellationToken::new(),
        }
    }

    /// Bearer token of the current session
    pub fn token(&self) -> Option<String> {
        self.session.current().map(|s| s.token().to_string())
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn api(&self) -> &Arc<dyn EventsApi> {
        &self.api
    }

    /// New scope for a view; torn down with the view or on shutdown
    pub fn scope(&self) -> ViewScope {
        ViewScope::child_of(&self.root)
    }

    /// Tear down every view created from this context
    pub fn shutdown(&self) {
        self.root.cancel();
    }

    async fn events(&self, token: &str) -> Fetched<Vec<Event>> {
        let api = Arc::clone(&self.api);
        let owned = token.to_string();
        self.resources
            .events
            .fetch(token, &ResourceKey::Events.to_string(), move || async move {
                api.list_events(&owned).await
            })
            .await
    }

    async fn event(&self, token: &str, event_id: &str) -> Fetched<Event> {
        let api = Arc::clone(&self.api);
        let owned = token.to_string();
        let id = event_id.to_string();
        self.resources
            .event
            .fetch(
                token,
                &ResourceKey::Event(event_id.to_string()).to_string(),
                move || async move { api.get_event(&owned, &id).await },
            )
            .await
    }

    async fn analytics(&self, token: &str, event_id: &str) -> Fetched<EventAnalytics> {
        let api = Arc::clone(&self.api);
        let owned = token.to_string();
        let id = event_id.to_string();
        self.resources
            .analytics
            .fetch(
                token,
                &ResourceKey::Analytics(event_id.to_string()).to_string(),
                move || async move { api.event_analytics(&owned, &id).await },
            )
            .await
    }
}

/// Run a read through the scope and apply the view's failure policy.
///
/// `Ok` carries the fetched value; every other outcome has already been
/// logged and `last_error` updated.
async fn load<T, Fut>(
    scope: &ViewScope,
    what: &str,
    last_error: &mut Option<String>,
    fetch: Fut,
) -> Result<Arc<T>, Activation>
where
    Fut: std::future::Future<Output = Fetched<T>>,
{
    match scope.run(fetch).await {
        None => {
            tracing::debug!("View torn down while fetching {}", what);
            Err(Activation::TornDown)
        }
        Some(Ok(value)) => {
            *last_error = None;
            Ok(value)
        }
        Some(Err(e)) => {
            tracing::error!(error = %e, "Failed to fetch {}", what);
            *last_error = Some(e.to_string());
            Err(Activation::Failed)
        }
    }
}

/// Run a mutation through the scope, logging failures
async fn mutate<T, Fut>(scope: &ViewScope, what: &str, work: Fut) -> Result<T, ViewError>
where
    Fut: std::future::Future<Output = Result<T, ApiError>>,
{
    match scope.run(work).await {
        None => Err(ViewError::TornDown),
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => {
            tracing::error!(error = %e, "Failed to {}", what);
            Err(ViewError::Api(e))
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted events API shared by the view tests

    use super::*;
    use crate::api::{ApiResult, NewEvent};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeEvents {
        pub events: Mutex<Vec<Event>>,
        pub analytics: Mutex<std::collections::HashMap<String, EventAnalytics>>,
        pub fail: Mutex<bool>,
        pub calls: Mutex<Vec<String>>,
        pub created: Mutex<Vec<NewEvent>>,
        /// List requests never answer while set
        pub stall_lists: std::sync::atomic::AtomicBool,
    }

    impl FakeEvents {
        pub fn with_events(events: Vec<Event>) -> Arc<Self> {
            let fake = Self::default();
            *fake.events.lock().unwrap() = events;
            Arc::new(fake)
        }

        pub fn set_failing(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String, token: &str) -> ApiResult<()> {
            self.calls.lock().unwrap().push(call);
            if token.is_empty() {
                return Err(ApiError::Status {
                    status: 401,
                    message: "missing token".to_string(),
                });
            }
            if *self.fail.lock().unwrap() {
                return Err(ApiError::Status {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl EventsApi for FakeEvents {
        async fn list_events(&self, token: &str) -> ApiResult<Vec<Event>> {
            self.record("list".to_string(), token)?;
            if self.stall_lists.load(std::sync::atomic::Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            // Stay in flight for one poll so concurrent views can join
            tokio::task::yield_now().await;
            Ok(self.events.lock().unwrap().clone())
        }

        async fn get_event(&self, token: &str, event_id: &str) -> ApiResult<Event> {
            self.record(format!("get {}", event_id), token)?;
            self.events
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == event_id)
                .cloned()
                .ok_or_else(|| ApiError::Status {
                    status: 404,
                    message: "Event not found".to_string(),
                })
        }

        async fn create_event(&self, token: &str, event: &NewEvent) -> ApiResult<Event> {
            self.record(format!("create {}", event.name), token)?;
            self.created.lock().unwrap().push(event.clone());
            let created = sample_event(&format!("evt-{}", event.name), &event.name, &[]);
            self.events.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn delete_event(&self, token: &str, event_id: &str) -> ApiResult<()> {
            self.record(format!("delete {}", event_id), token)?;
            self.events.lock().unwrap().retain(|e| e.id != event_id);
            Ok(())
        }

        async fn add_participants(
            &self,
            token: &str,
            event_id: &str,
            user_ids: &[String],
        ) -> ApiResult<()> {
            self.record(format!("add {} {}", event_id, user_ids.join(",")), token)
        }

        async fn event_analytics(&self, token: &str, event_id: &str) -> ApiResult<EventAnalytics> {
            self.record(format!("analytics {}", event_id), token)?;
            self.analytics
                .lock()
                .unwrap()
                .get(event_id)
                .cloned()
                .ok_or_else(|| ApiError::Status {
                    status: 404,
                    message: "No analytics".to_string(),
                })
        }
    }

    pub fn sample_event(id: &str, name: &str, participants: &[&str]) -> Event {
        Event {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{} description", name),
            start_date: "2024-06-01T09:00:00.000Z".to_string(),
            end_date: "2024-06-02T17:00:00.000Z".to_string(),
            event_type: crate::api::EventType::InPerson,
            capacity: Some(100),
            participants: participants
                .iter()
                .map(|p| crate::api::Participant {
                    user_id: p.to_string(),
                })
                .collect(),
        }
    }

    /// Context with a session already installed
    pub async fn logged_in(api: Arc<FakeEvents>) -> (ViewContext, Arc<crate::session::SessionStore>) {
        let store = Arc::new(crate::session::SessionStore::new(
            crate::session::testing::FakeAuth::accepting("T"),
            Arc::new(crate::session::MemoryStorage::new()),
        ));
        store.login("ada@example.com", "secret").await.unwrap();
        (ViewContext::new(store.subscribe(), api), store)
    }

    /// Context with no session
    pub fn logged_out(api: Arc<FakeEvents>) -> (ViewContext, Arc<crate::session::SessionStore>) {
        let store = Arc::new(crate::session::SessionStore::new(
            crate::session::testing::FakeAuth::accepting("T"),
            Arc::new(crate::session::MemoryStorage::new()),
        ));
        (ViewContext::new(store.subscribe(), api), store)
    }
}
