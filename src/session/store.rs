//! Session Store
//!
//! Owns the single authentication credential and its durable copy. Writes
//! happen only in restore, login, register and logout; every reader observes
//! the latest completed write through a [`SessionHandle`].

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

use super::claims::TokenClaims;
use super::storage::{LocalStorage, TOKEN_KEY};
use crate::api::{AuthApi, AuthError, LoginRequest, RegisterRequest};
use crate::routes::Route;

/// An authenticated session: the bearer token and nothing else
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Raw bearer token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Unverified claims, if the token is a decodable JWT
    pub fn claims(&self) -> Option<TokenClaims> {
        TokenClaims::decode(&self.token).ok()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Read-only view of the session for dependents
#[derive(Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<Option<Session>>,
}

impl SessionHandle {
    /// Current session, if any
    pub fn current(&self) -> Option<Session> {
        self.rx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait until the session changes. Returns false once the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// What [`SessionStore::restore`] found in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing stored
    Empty,
    /// A live token was installed
    Restored,
    /// The stored token had expired and was purged
    Expired,
    /// The stored value was not a decodable token and was purged
    Invalid,
}

/// Process-wide session state backed by durable storage
pub struct SessionStore {
    auth: Arc<dyn AuthApi>,
    storage: Arc<dyn LocalStorage>,
    state: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// Create an empty store. Call [`SessionStore::restore`] once at start.
    pub fn new(auth: Arc<dyn AuthApi>, storage: Arc<dyn LocalStorage>) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            auth,
            storage,
            state,
        }
    }

    /// Subscribe to session changes
    pub fn subscribe(&self) -> SessionHandle {
        SessionHandle {
            rx: self.state.subscribe(),
        }
    }

    /// Synchronous read of the current session
    pub fn current_user(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    /// Restore a stored token, dropping it if it has expired
    pub fn restore(&self) -> RestoreOutcome {
        self.restore_at(Utc::now())
    }

    /// Restore against an explicit clock
    pub fn restore_at(&self, now: DateTime<Utc>) -> RestoreOutcome {
        let stored = match self.storage.get_item(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return RestoreOutcome::Empty,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored session");
                return RestoreOutcome::Empty;
            }
        };

        let outcome = match TokenClaims::decode(&stored) {
            Ok(claims) if claims.is_expired_at(now) => {
                tracing::info!(
                    expired_at = ?claims.expires_at(),
                    "Stored session expired, signing out"
                );
                RestoreOutcome::Expired
            }
            Ok(_) => {
                self.state.send_replace(Some(Session::new(stored)));
                tracing::info!("Session restored");
                return RestoreOutcome::Restored;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored session token is unreadable, discarding");
                RestoreOutcome::Invalid
            }
        };

        self.purge();
        self.state.send_replace(None);
        outcome
    }

    /// Log in and install the returned token.
    ///
    /// On success the caller should navigate to the returned route. On any
    /// failure neither the session nor storage is touched.
    pub async fn login(&self, email: &str, password: &str) -> Result<Route, AuthError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let token = self.auth.login(&request).await?;
        self.install(token)?;
        tracing::info!(email, "Logged in");
        Ok(Route::Dashboard)
    }

    /// Register an account; a successful registration is also a login
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Route, AuthError> {
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        let token = self.auth.register(&request).await?;
        self.install(token)?;
        tracing::info!(email, "Registered and logged in");
        Ok(Route::Dashboard)
    }

    /// Clear the session and its stored token. Never fails, never touches
    /// the network.
    pub fn logout(&self) -> Route {
        self.purge();
        self.state.send_replace(None);
        tracing::info!("Logged out");
        Route::Login
    }

    fn install(&self, token: String) -> Result<(), AuthError> {
        self.storage.set_item(TOKEN_KEY, &token)?;
        self.state.send_replace(Some(Session::new(token)));
        Ok(())
    }

    fn purge(&self) {
        if let Err(e) = self.storage.remove_item(TOKEN_KEY) {
            tracing::error!(error = %e, "Failed to remove stored session token");
        }
    }
}
