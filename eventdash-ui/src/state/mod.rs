//! State Management
//!
//! Session state and page lifetimes.

pub mod auth;
pub mod scope;

pub use auth::{provide_auth_state, use_auth, AuthState};
pub use scope::PageScope;
