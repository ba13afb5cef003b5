//! Shared HTTP plumbing for the hosted backend.
//!
//! Every request carries the public `apikey` header and an `Authorization:
//! Bearer` header. Until a signed-in access token is set, the bearer is the
//! anon key, which is what the hosted API expects for anonymous calls.

use std::sync::RwLock;
use std::time::Duration;

use anyhow::Context;
use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use studio_core::{AppConfig, BackendError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    access_token: RwLock<Option<String>>,
}

impl SupabaseClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> anyhow::Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            anyhow::bail!("backend url is not configured");
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url,
            anon_key: anon_key.into(),
            access_token: RwLock::new(None),
        })
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(&config.backend_url, &config.anon_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Use a signed-in user's token instead of the anon key as the bearer.
    pub fn set_access_token(&self, token: Option<String>) {
        match self.access_token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    fn bearer(&self) -> String {
        let token = match self.access_token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        token.unwrap_or_else(|| self.anon_key.clone())
    }

    /// `{base}/rest/v1/{table}`
    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.bearer()))
    }
}

/// Send a request and turn every non-success status into a [`BackendError`].
pub(crate) async fn send(builder: RequestBuilder) -> Result<Response, BackendError> {
    let response = builder.send().await.map_err(map_reqwest_error)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(map_status_code(status, &body))
}

pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
}

pub(crate) fn map_status_code(status: StatusCode, body: &str) -> BackendError {
    BackendError::from_status(status.as_u16(), error_message(status, body))
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_decode() {
        BackendError::Decode(err.to_string())
    } else if let Some(status) = err.status() {
        map_status_code(status, "")
    } else if err.is_timeout() {
        BackendError::Network("request timed out".to_string())
    } else {
        BackendError::Network(err.to_string())
    }
}

/// Pull a readable message out of a PostgREST, Storage or Auth error body.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        });

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}

/// Total row count from a `Content-Range` header (`0-24/57`, `*/57`).
pub(crate) fn parse_content_range(value: &str) -> Option<u64> {
    let (_, total) = value.trim().rsplit_once('/')?;
    total.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_base_url() {
        assert!(SupabaseClient::new("  ", "anon").is_err());
    }

    #[test]
    fn test_rest_url_trims_trailing_slash() {
        let client = SupabaseClient::new("https://demo.supabase.co/", "anon").unwrap();
        assert_eq!(
            client.rest_url("contacts"),
            "https://demo.supabase.co/rest/v1/contacts"
        );
        assert_eq!(
            client.url("/auth/v1/user"),
            "https://demo.supabase.co/auth/v1/user"
        );
    }

    #[test]
    fn test_bearer_falls_back_to_anon_key() {
        let client = SupabaseClient::new("https://demo.supabase.co", "anon").unwrap();
        assert_eq!(client.bearer(), "anon");

        client.set_access_token(Some("user-jwt".into()));
        assert_eq!(client.bearer(), "user-jwt");

        client.set_access_token(None);
        assert_eq!(client.bearer(), "anon");
    }

    #[test]
    fn test_map_status_code() {
        assert_eq!(
            map_status_code(StatusCode::UNAUTHORIZED, ""),
            BackendError::Unauthorized
        );
        assert_eq!(
            map_status_code(StatusCode::NOT_ACCEPTABLE, ""),
            BackendError::NotFound
        );
        assert_eq!(
            map_status_code(StatusCode::CONFLICT, "{}"),
            BackendError::Conflict
        );
        assert_eq!(
            map_status_code(
                StatusCode::BAD_REQUEST,
                r#"{"code":"22P02","message":"invalid input syntax"}"#
            ),
            BackendError::Rejected {
                status: 400,
                message: "invalid input syntax".into()
            }
        );
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down"), "upstream down");
    }

    #[test]
    fn test_parse_content_range() {
        assert_eq!(parse_content_range("0-24/57"), Some(57));
        assert_eq!(parse_content_range("*/57"), Some(57));
        assert_eq!(parse_content_range("0-24/*"), None);
        assert_eq!(parse_content_range("garbage"), None);
    }
}
