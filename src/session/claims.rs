//! Unverified token claim decoding
//!
//! Reads the payload of a JWT without checking its signature. The result is
//! only used to decide whether a stored token is worth restoring; the server
//! stays the authority on whether a token is actually valid.

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

/// Claims the client cares about. Unknown claims are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// Expiry, seconds since the Unix epoch; issuers may send a fraction
    #[serde(default)]
    pub exp: Option<f64>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Error, Debug, PartialEq)]
#[error("token is not a decodable JWT: {0}")]
pub struct ClaimsError(String);

/// Decode-only settings: no signature, no time or audience checks
fn unverified() -> Validation {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    validation
}

impl TokenClaims {
    /// Decode the payload of `token`
    pub fn decode(token: &str) -> Result<Self, ClaimsError> {
        jsonwebtoken::decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &unverified())
            .map(|data| data.claims)
            .map_err(|e| ClaimsError(e.to_string()))
    }

    fn exp_millis(&self) -> Option<f64> {
        self.exp.map(|exp| exp * 1000.0)
    }

    /// Expiry as a timestamp, if the token carries one
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp_millis()
            .and_then(|ms| DateTime::from_timestamp_millis(ms as i64))
    }

    /// True when `exp` lies strictly before `now`.
    ///
    /// Compared at millisecond resolution; a token without `exp` never
    /// expires on the client side.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.exp_millis() {
            Some(exp_ms) => exp_ms < now.timestamp_millis() as f64,
            None => false,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_tokens::*;
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_decode_claims() {
        let token = token_with_payload(&json!({
            "sub": "user-1",
            "email": "ada@example.com",
            "exp": 1_700_000_000,
            "iat": 1_699_990_000
        }));

        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.exp, Some(1_700_000_000.0));
        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
        assert_eq!(
            claims.expires_at().unwrap(),
            Utc.timestamp_opt(1_700_000_000, 0).unwrap()
        );
    }

    #[test]
    fn test_expiry_is_strict() {
        let claims = TokenClaims {
            exp: Some(1_700_000_000.0),
            ..Default::default()
        };

        let at_expiry = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert!(!claims.is_expired_at(at_expiry));
        assert!(claims.is_expired_at(at_expiry + chrono::Duration::milliseconds(1)));
        assert!(!claims.is_expired_at(at_expiry - chrono::Duration::seconds(60)));
    }

    #[test]
    fn test_missing_exp_never_expires() {
        let claims = TokenClaims::decode(&token_with_payload(&json!({ "sub": "x" }))).unwrap();
        assert!(!claims.is_expired_at(Utc::now()));
        assert!(claims.expires_at().is_none());
    }

    #[test]
    fn test_fractional_exp_is_kept() {
        let token = token_with_payload(&json!({ "sub": "x", "exp": 1_700_000_000.5 }));
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.exp, Some(1_700_000_000.5));

        let at_expiry = Utc.timestamp_opt(1_700_000_000, 500_000_000).unwrap();
        assert!(!claims.is_expired_at(at_expiry));
        assert!(claims.is_expired_at(at_expiry + chrono::Duration::milliseconds(1)));
        assert_eq!(claims.expires_at(), Some(at_expiry));
    }

    #[test]
    fn test_signature_and_audience_are_not_checked() {
        let token = token_with_payload(&json!({
            "sub": "x",
            "aud": "someone-else",
            "exp": 1
        }));
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.exp, Some(1.0));
        assert!(claims.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(TokenClaims::decode("opaque").is_err());
        assert!(TokenClaims::decode("a.!!!.c").is_err());

        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let not_json = format!("{}.{}.s", header, URL_SAFE_NO_PAD.encode("[1,2"));
        assert!(TokenClaims::decode(&not_json).is_err());
    }
}
