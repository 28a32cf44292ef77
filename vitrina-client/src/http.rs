//! HTTP client for network calls against the backend
//!
//! The backend's response shapes are not contractually fixed, so nothing
//! here deserializes into typed DTOs: every response is decoded into a
//! [`RawResponse`] carrying the status and a best-effort JSON body, and
//! classification happens downstream in [`crate::auth`].

use crate::{ClientConfig, ClientResult};
use http::StatusCode;
use reqwest::Client;
use serde_json::{Value, json};
use std::sync::{Arc, PoisonError, RwLock};

/// A response as received: status plus tolerantly-decoded body.
///
/// Non-JSON bodies are wrapped as `{"message": <text>}` so downstream
/// classification always has one shape to probe.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// HTTP client for making network requests to the backend.
///
/// Clones share the bearer slot: activating a session on one handle makes
/// every subsequent request carry `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the bearer credential sent with subsequent requests
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    /// Drop the bearer credential
    pub fn clear_token(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Get the current token
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Make a POST request with a JSON body
    pub async fn post_json<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<RawResponse> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self.client.post(&url).json(body);

        if let Some(token) = self.token() {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        Ok(Self::decode(response).await)
    }

    /// Decode a response body without assuming a content type.
    ///
    /// Tries JSON first, then re-parses text bodies as JSON, then wraps
    /// whatever is left as a message object. An unreadable or empty body
    /// falls back to the status line.
    async fn decode(response: reqwest::Response) -> RawResponse {
        let status = response.status();
        let body = match response.text().await {
            Ok(text) if !text.trim().is_empty() => match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(_) => json!({ "message": text }),
            },
            _ => json!({
                "message": status.canonical_reason().unwrap_or("Error en la solicitud")
            }),
        };
        RawResponse { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_bearer_slot() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:5107"));
        let clone = client.clone();

        client.set_token("tok-1");
        assert_eq!(clone.token().as_deref(), Some("tok-1"));

        clone.clear_token();
        assert!(client.token().is_none());
    }
}
