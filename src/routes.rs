//! Route table
//!
//! Every screen has a path. Anything under [`DASHBOARD_PREFIX`] needs a
//! session; `/login` and `/register` are public.

use std::fmt;

/// Protected area prefix
pub const DASHBOARD_PREFIX: &str = "/dashboard";

/// Screens of the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Events,
    EventCreate,
    EventDetail(String),
    Analytics,
}

impl Route {
    /// Parse a path. Trailing slashes and query strings are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["dashboard"] => Some(Route::Dashboard),
            ["dashboard", "events"] => Some(Route::Events),
            ["dashboard", "events", "create"] => Some(Route::EventCreate),
            ["dashboard", "events", id] => urlencoding::decode(id)
                .ok()
                .map(|id| Route::EventDetail(id.into_owned())),
            ["dashboard", "analytics"] => Some(Route::Analytics),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => DASHBOARD_PREFIX.to_string(),
            Route::Events => format!("{}/events", DASHBOARD_PREFIX),
            Route::EventCreate => format!("{}/events/create", DASHBOARD_PREFIX),
            Route::EventDetail(id) => {
                format!("{}/events/{}", DASHBOARD_PREFIX, urlencoding::encode(id))
            }
            Route::Analytics => format!("{}/analytics", DASHBOARD_PREFIX),
        }
    }

    /// Whether this route requires a session
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    /// Sidebar links shown around protected content
    pub fn navigation() -> [(Route, &'static str); 3] {
        [
            (Route::Dashboard, "Dashboard"),
            (Route::Events, "Events"),
            (Route::Analytics, "Analytics"),
        ]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Whether a raw path falls in the protected area
pub fn is_protected_path(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path == DASHBOARD_PREFIX
        || path
            .strip_prefix(DASHBOARD_PREFIX)
            .map(|rest| rest.starts_with('/'))
            .unwrap_or(false)
}
