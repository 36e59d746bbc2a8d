//! Session Management
//!
//! The client's record of an authenticated user.
//!
//! ## Architecture
//!
//! - **LocalStorage**: durable key/value storage holding the raw token
//! - **TokenClaims**: decode-only view of the token payload (no signature check)
//! - **SessionStore**: restore, login, register, logout, current user
//! - **SessionGate**: render-or-redirect decision for protected content

mod claims;
mod gate;
mod storage;
mod store;

pub use claims::{ClaimsError, TokenClaims};
pub use gate::{GateDecision, SessionGate};
pub use storage::{FileStorage, LocalStorage, MemoryStorage, StorageError, TOKEN_KEY};
pub use store::{RestoreOutcome, Session, SessionHandle, SessionStore};

#[cfg(test)]
pub(crate) use claims::test_tokens;
#[cfg(test)]
pub(crate) use store::testing;
