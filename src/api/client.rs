//! Events API REST Client
//!
//! HTTP client for the remote events, analytics and authentication API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::{ApiError, ApiResult, AuthError};
use super::models::{
    AddParticipantsRequest, ErrorMessage, Event, EventAnalytics, LoginRequest, NewEvent,
    RegisterRequest, TokenResponse,
};

/// Authentication endpoints. Neither call carries a bearer token.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token
    async fn login(&self, request: &LoginRequest) -> Result<String, AuthError>;

    /// Create an account; the response token doubles as a login
    async fn register(&self, request: &RegisterRequest) -> Result<String, AuthError>;
}

/// Protected resource endpoints. Every call is authorized with `token`.
#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn list_events(&self, token: &str) -> ApiResult<Vec<Event>>;

    async fn get_event(&self, token: &str, event_id: &str) -> ApiResult<Event>;

    async fn create_event(&self, token: &str, event: &NewEvent) -> ApiResult<Event>;

    async fn delete_event(&self, token: &str, event_id: &str) -> ApiResult<()>;

    async fn add_participants(
        &self,
        token: &str,
        event_id: &str,
        user_ids: &[String],
    ) -> ApiResult<()>;

    async fn event_analytics(&self, token: &str, event_id: &str) -> ApiResult<EventAnalytics>;
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL, e.g. "http://localhost:3000/api"
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl From<&crate::config::ApiConfig> for ApiClientConfig {
    fn from(config: &crate::config::ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            request_timeout_ms: u64::try_from(config.timeout().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// reqwest-backed client for the events API
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(config: ApiClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn event_path(event_id: &str) -> String {
        format!("/events/{}", urlencoding::encode(event_id))
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        request.send().await.map_err(ApiError::from_transport)
    }

    /// Send an authorized request and require a success status
    async fn send_authorized(&self, request: RequestBuilder, token: &str) -> ApiResult<Response> {
        let response = self.send(request.bearer_auth(token)).await?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::status_error(response).await)
        }
    }

    async fn status_error(response: Response) -> ApiError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorMessage>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or(text);

        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let bytes = response.bytes().await.map_err(ApiError::from_transport)?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Shared login/register exchange.
    ///
    /// The token is only returned when the endpoint reports success; a
    /// rejection yields the server message or `fallback`.
    async fn authenticate<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<String, AuthError> {
        let response = self.send(self.client.post(self.url(path)).json(body)).await?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::from_transport)?;

        if status.is_success() {
            let parsed: TokenResponse =
                serde_json::from_slice(&bytes).map_err(|_| AuthError::MalformedResponse)?;
            if parsed.token.is_empty() {
                return Err(AuthError::MalformedResponse);
            }
            Ok(parsed.token)
        } else {
            let message = serde_json::from_slice::<ErrorMessage>(&bytes)
                .ok()
                .and_then(|body| body.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| fallback.to_string());

            tracing::debug!(status = status.as_u16(), path, "Authentication rejected");
            Err(AuthError::Rejected(message))
        }
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<String, AuthError> {
        self.authenticate("/auth/login", request, "Login failed").await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<String, AuthError> {
        self.authenticate("/auth/register", request, "Registration failed")
            .await
    }
}

#[async_trait]
impl EventsApi for ApiClient {
    async fn list_events(&self, token: &str) -> ApiResult<Vec<Event>> {
        tracing::debug!("GET /events");
        let response = self
            .send_authorized(self.client.get(self.url("/events")), token)
            .await?;
        Self::decode(response).await
    }

    async fn get_event(&self, token: &str, event_id: &str) -> ApiResult<Event> {
        let path = Self::event_path(event_id);
        tracing::debug!("GET {}", path);
        let response = self
            .send_authorized(self.client.get(self.url(&path)), token)
            .await?;
        Self::decode(response).await
    }

    async fn create_event(&self, token: &str, event: &NewEvent) -> ApiResult<Event> {
        tracing::debug!(name = %event.name, "POST /events");
        let response = self
            .send_authorized(self.client.post(self.url("/events")).json(event), token)
            .await?;
        Self::decode(response).await
    }

    async fn delete_event(&self, token: &str, event_id: &str) -> ApiResult<()> {
        let path = Self::event_path(event_id);
        tracing::debug!("DELETE {}", path);
        self.send_authorized(self.client.delete(self.url(&path)), token)
            .await?;
        Ok(())
    }

    async fn add_participants(
        &self,
        token: &str,
        event_id: &str,
        user_ids: &[String],
    ) -> ApiResult<()> {
        let path = format!("{}/participants", Self::event_path(event_id));
        tracing::debug!(count = user_ids.len(), "POST {}", path);
        let body = AddParticipantsRequest {
            user_ids: user_ids.to_vec(),
        };
        self.send_authorized(self.client.post(self.url(&path)).json(&body), token)
            .await?;
        Ok(())
    }

    async fn event_analytics(&self, token: &str, event_id: &str) -> ApiResult<EventAnalytics> {
        let path = format!(
            "/analytics/events/{}/dashboard",
            urlencoding::encode(event_id)
        );
        tracing::debug!("GET {}", path);
        let response = self
            .send_authorized(self.client.get(self.url(&path)), token)
            .await?;
        Self::decode(response).await
    }
}
