//! Request Lifecycle
//!
//! Shared plumbing for fetch-on-activate views.
//!
//! - **Coalescer**: one in-flight request per resource key
//! - **ViewScope**: cancels a view's requests when the view goes away
//! - **ResourceKey**: names the resources views fetch

mod coalesce;
mod scope;

pub use coalesce::{Coalescer, Fetched};
pub use scope::ViewScope;

use std::fmt;

/// Resources fetched by the views
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    Events,
    Event(String),
    Analytics(String),
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKey::Events => f.write_str("events"),
            ResourceKey::Event(id) => write!(f, "event:{}", id),
            ResourceKey::Analytics(id) => write!(f, "analytics:{}", id),
        }
    }
}
