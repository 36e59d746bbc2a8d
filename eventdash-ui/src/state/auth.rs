//! Auth State
//!
//! The session token as a reactive signal, backed by `localStorage`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use leptos::*;

use crate::api;

/// Local storage key holding the raw bearer token
pub const TOKEN_KEY: &str = "token";

/// Session state provided to all components
#[derive(Clone, Copy)]
pub struct AuthState {
    /// Current bearer token
    pub token: RwSignal<Option<String>>,
}

/// What a stored token is worth at restore time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Valid,
    Expired,
    /// Not a decodable JWT
    Invalid,
}

#[derive(serde::Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<f64>,
}

/// Check a token's `exp` claim against `now_ms` without verifying it
pub fn token_status(token: &str, now_ms: i64) -> TokenStatus {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return TokenStatus::Invalid;
    }

    let claims = URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .ok()
        .and_then(|bytes| serde_json::from_slice::<Claims>(&bytes).ok());

    match claims {
        None => TokenStatus::Invalid,
        Some(Claims { exp: Some(exp) }) if exp * 1000.0 < now_ms as f64 => {
            TokenStatus::Expired
        }
        Some(_) => TokenStatus::Valid,
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Read the stored token, dropping it when expired or unreadable
fn restore_token() -> Option<String> {
    let storage = local_storage()?;
    let token = storage.get_item(TOKEN_KEY).ok().flatten()?;

    match token_status(&token, js_sys::Date::now() as i64) {
        TokenStatus::Valid => Some(token),
        status => {
            web_sys::console::log_1(&format!("Discarding stored session: {:?}", status).into());
            let _ = storage.remove_item(TOKEN_KEY);
            None
        }
    }
}

/// Restore the session and provide it to the component tree
pub fn provide_auth_state() {
    let state = AuthState {
        token: create_rw_signal(restore_token()),
    };
    provide_context(state);
}

pub fn use_auth() -> AuthState {
    use_context::<AuthState>().expect("AuthState not found")
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.with(|t| t.is_some())
    }

    /// Token for a request, without subscribing to changes
    pub fn bearer(&self) -> Option<String> {
        self.token.get_untracked()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), String> {
        let token = api::login(email, password).await?;
        self.install(token);
        Ok(())
    }

    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<(), String> {
        let token = api::register(email, password, name).await?;
        self.install(token);
        Ok(())
    }

    pub fn logout(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
        self.token.set(None);
    }

    fn install(&self, token: String) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(TOKEN_KEY, &token);
        }
        self.token.set(Some(token));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(payload: &str) -> String {
        format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_expired_token() {
        let t = token(r#"{"exp":1000}"#);
        assert_eq!(token_status(&t, 1_000_001), TokenStatus::Expired);
        assert_eq!(token_status(&t, 1_000_000), TokenStatus::Valid);
    }

    #[test]
    fn test_fractional_exp() {
        let t = token(r#"{"exp":1000.5}"#);
        assert_eq!(token_status(&t, 1_000_500), TokenStatus::Valid);
        assert_eq!(token_status(&t, 1_000_501), TokenStatus::Expired);
    }

    #[test]
    fn test_token_without_exp_is_valid() {
        assert_eq!(token_status(&token(r#"{"sub":"u1"}"#), i64::MAX), TokenStatus::Valid);
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert_eq!(token_status("not-a-jwt", 0), TokenStatus::Invalid);
        assert_eq!(token_status("a.!!!.c", 0), TokenStatus::Invalid);
        assert_eq!(token_status(&token(r#""hello""#), 0), TokenStatus::Invalid);
    }
}
