//! # EventDash
//!
//! Admin dashboard client for a remote events service: authenticate, browse
//! and manage events and their participants, and inspect engagement
//! analytics.
//!
//! ## Features
//!
//! - **Session management**: bearer token persisted locally, restored at
//!   start and dropped once expired
//! - **Gated screens**: everything under `/dashboard` needs a session
//! - **Resource views**: events, event detail, event creation, analytics
//! - **Request lifecycle**: concurrent fetches share one request; closing a
//!   view discards its pending responses
//!
//! ## Modules
//!
//! - [`api`]: REST client for the events API
//! - [`session`]: session store, local storage and gate
//! - [`views`]: fetch-on-activate screens
//! - [`fetch`]: request coalescing and view scopes
//! - [`routes`]: route table
//! - [`config`]: configuration loading
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use eventdash::api::{ApiClient, ApiClientConfig};
//! use eventdash::session::{FileStorage, SessionStore};
//! use eventdash::views::{EventsList, ViewContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(ApiClient::new(ApiClientConfig::default())?);
//!     let store = SessionStore::new(client.clone(), Arc::new(FileStorage::new("~/.eventdash")));
//!
//!     // Reuse the stored token, or sign in
//!     store.restore();
//!     if store.current_user().is_none() {
//!         store.login("admin@example.com", "secret").await?;
//!     }
//!
//!     let ctx = ViewContext::new(store.subscribe(), client);
//!     let mut events = EventsList::new(&ctx);
//!     events.activate().await;
//!     println!("{} events", events.events().len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod fetch;
pub mod routes;
pub mod session;
pub mod views;

// Re-export top-level types for convenience
pub use api::{
    ApiClient, ApiClientConfig, ApiError, ApiResult, AuthApi, AuthError, Capacity, Event,
    EventAnalytics, EventType, EventsApi, NewEvent, SessionAnalytics,
};

pub use session::{
    FileStorage, GateDecision, LocalStorage, RestoreOutcome, Session, SessionGate,
    SessionHandle, SessionStore,
};

pub use views::{
    Activation, AnalyticsView, DashboardSummary, EventCreate, EventDetail, EventForm,
    EventsList, ViewContext, ViewError,
};

pub use routes::Route;

pub use config::{ApiConfig, Config, ConfigError, LogFormat, LoggingConfig, SessionConfig};
