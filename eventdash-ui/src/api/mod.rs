//! Events API access
//!
//! Wire types and HTTP calls for the events API.

pub mod client;
pub mod models;

pub use client::*;
pub use models::*;
