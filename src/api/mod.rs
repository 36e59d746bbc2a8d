//! Events API Client
//!
//! Typed access to the remote events API.
//!
//! # Endpoints
//!
//! ## Authentication
//! - `POST /auth/login` - Exchange email and password for a token
//! - `POST /auth/register` - Create an account, returns a token
//!
//! ## Events
//! - `GET /events` - List events
//! - `GET /events/:id` - Get one event with participants
//! - `POST /events` - Create an event
//! - `DELETE /events/:id` - Delete an event
//! - `POST /events/:id/participants` - Add participants
//!
//! ## Analytics
//! - `GET /analytics/events/:id/dashboard` - Engagement snapshot
//!
//! Everything except the authentication endpoints is sent with an
//! `Authorization: Bearer <token>` header.
//!
//! # Example
//!
//! ```rust,no_run
//! use eventdash::api::{ApiClient, ApiClientConfig, EventsApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ApiClientConfig::default())?;
//!     let events = client.list_events("my-token").await?;
//!     println!("{} events", events.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;

pub use client::{ApiClient, ApiClientConfig, AuthApi, EventsApi};
pub use error::{ApiError, ApiResult, AuthError};
pub use models::{
    Capacity, Event, EventAnalytics, EventType, LoginRequest, NewEvent, Participant,
    RegisterRequest, SessionAnalytics,
};
