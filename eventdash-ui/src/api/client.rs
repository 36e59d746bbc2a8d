//! HTTP API Client
//!
//! Functions for communicating with the events REST API. Errors come back as
//! display-ready strings.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use super::models::{Event, EventAnalytics, NewEvent};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item("eventdash_api_url").ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

fn event_url(event_id: &str) -> String {
    format!("{}/events/{}", get_api_base(), encode(event_id))
}

fn encode(segment: &str) -> String {
    String::from(js_sys::encode_uri_component(segment))
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Server `message` from an error response, or `fallback`
async fn error_message(response: Response, fallback: &str) -> String {
    let body: ErrorBody = response.json().await.unwrap_or_default();
    body.message.unwrap_or_else(|| fallback.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, String> {
    if !response.ok() {
        return Err(error_message(response, fallback).await);
    }
    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

async fn expect_ok(response: Response, fallback: &str) -> Result<(), String> {
    if response.ok() {
        Ok(())
    } else {
        Err(error_message(response, fallback).await)
    }
}

// ============ Authentication ============

async fn authenticate(path: &str, body: serde_json::Value, fallback: &str) -> Result<String, String> {
    let response = Request::post(&format!("{}{}", get_api_base(), path))
        .json(&body)
        .map_err(|e| format!("Request error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, fallback).await);
    }

    let body: TokenResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;
    body.token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| fallback.to_string())
}

/// Exchange credentials for a token
pub async fn login(email: &str, password: &str) -> Result<String, String> {
    let body = serde_json::json!({ "email": email, "password": password });
    authenticate("/auth/login", body, "Login failed").await
}

/// Create an account; returns a token
pub async fn register(email: &str, password: &str, name: &str) -> Result<String, String> {
    let body = serde_json::json!({ "email": email, "password": password, "name": name });
    authenticate("/auth/register", body, "Registration failed").await
}

// ============ Events ============

/// Fetch all events
pub async fn fetch_events(token: &str) -> Result<Vec<Event>, String> {
    let response = Request::get(&format!("{}/events", get_api_base()))
        .header("Authorization", &bearer(token))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    decode(response, "Failed to fetch events").await
}

/// Fetch one event with participants
pub async fn fetch_event(token: &str, event_id: &str) -> Result<Event, String> {
    let response = Request::get(&event_url(event_id))
        .header("Authorization", &bearer(token))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    decode(response, "Failed to fetch event details").await
}

/// Create an event
pub async fn create_event(token: &str, event: &NewEvent) -> Result<(), String> {
    let response = Request::post(&format!("{}/events", get_api_base()))
        .header("Authorization", &bearer(token))
        .json(event)
        .map_err(|e| format!("Request error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    expect_ok(response, "Failed to create event").await
}

/// Delete an event
pub async fn delete_event(token: &str, event_id: &str) -> Result<(), String> {
    let response = Request::delete(&event_url(event_id))
        .header("Authorization", &bearer(token))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    expect_ok(response, "Failed to delete event").await
}

/// Add participants to an event
pub async fn add_participants(token: &str, event_id: &str, user_ids: &[String]) -> Result<(), String> {
    let body = serde_json::json!({ "userIds": user_ids });
    let response = Request::post(&format!("{}/participants", event_url(event_id)))
        .header("Authorization", &bearer(token))
        .json(&body)
        .map_err(|e| format!("Request error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    expect_ok(response, "Failed to add participant").await
}

// ============ Analytics ============

/// Fetch the analytics snapshot for an event
pub async fn fetch_analytics(token: &str, event_id: &str) -> Result<EventAnalytics, String> {
    let response = Request::get(&format!(
        "{}/analytics/events/{}/dashboard",
        get_api_base(),
        encode(event_id)
    ))
    .header("Authorization", &bearer(token))
    .send()
    .await
    .map_err(|e| format!("Network error: {}", e))?;

    decode(response, "Failed to fetch analytics").await
}
