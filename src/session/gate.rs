//! Session Gate
//!
//! Wraps protected content: nothing protected is produced without a session.
//! The check runs whenever the gate is activated; there is no timer and no
//! re-authentication.

use std::sync::Arc;

use super::store::{Session, SessionStore};
use crate::routes::Route;

/// Outcome of activating the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Render protected content for this session
    Render(Session),
    /// No session; send the caller here instead
    Redirect(Route),
}

/// Guards protected views
#[derive(Clone)]
pub struct SessionGate {
    store: Arc<SessionStore>,
}

impl SessionGate {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Decide whether protected content may render
    pub fn check(&self) -> GateDecision {
        match self.store.current_user() {
            Some(session) => GateDecision::Render(session),
            None => {
                tracing::debug!("No session, redirecting to login");
                GateDecision::Redirect(Route::Login)
            }
        }
    }

    /// Run `render` only when a session exists; otherwise return the
    /// redirect target without calling it.
    pub fn guard<T>(&self, render: impl FnOnce(&Session) -> T) -> Result<T, Route> {
        match self.check() {
            GateDecision::Render(session) => Ok(render(&session)),
            GateDecision::Redirect(route) => Err(route),
        }
    }

    /// Logout control exposed alongside protected content
    pub fn logout(&self) -> Route {
        self.store.logout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::storage::{LocalStorage, MemoryStorage, TOKEN_KEY};
    use crate::session::testing::FakeAuth;
    use std::cell::Cell;

    fn gate() -> (SessionGate, Arc<SessionStore>, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let store = Arc::new(SessionStore::new(
            FakeAuth::accepting("T"),
            Arc::clone(&storage) as Arc<dyn LocalStorage>,
        ));
        (SessionGate::new(Arc::clone(&store)), store, storage)
    }

    #[test]
    fn test_no_session_redirects_without_rendering() {
        let (gate, _store, _storage) = gate();
        let rendered = Cell::new(false);

        let result = gate.guard(|_| rendered.set(true));

        assert_eq!(result, Err(Route::Login));
        assert!(!rendered.get());
        assert_eq!(gate.check(), GateDecision::Redirect(Route::Login));
    }

    #[tokio::test]
    async fn test_session_renders_children() {
        let (gate, store, _storage) = gate();
        store.login("ada@example.com", "secret").await.unwrap();

        let result = gate.guard(|session| session.token().to_string());

        assert_eq!(result, Ok("T".to_string()));
        assert_eq!(gate.check(), GateDecision::Render(Session::new("T")));
    }

    #[tokio::test]
    async fn test_logout_control_closes_gate() {
        let (gate, store, storage) = gate();
        store.login("ada@example.com", "secret").await.unwrap();

        assert_eq!(gate.logout(), Route::Login);
        assert_eq!(gate.check(), GateDecision::Redirect(Route::Login));
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
    }
}
