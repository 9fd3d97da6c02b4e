//! Shared request helper for every backend endpoint.
//!
//! One place owns URL building, bearer auth, status handling, and error
//! message normalisation so the per-resource adapters stay one call deep.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::domain::ports::ApiError;

/// Reqwest-backed client for the CRM backend REST API.
///
/// Implements every backend port in `crate::domain::ports`.
#[derive(Clone)]
pub struct BackendApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl BackendApi {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Send `token` as a bearer credential on every request.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|value| !value.is_empty());
        self
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(super) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::transport(format!("base URL '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<Vec<u8>, ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "sending backend request");
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let payload = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let message = error_message(status, content_type.as_deref(), &payload);
            warn!(%method, status = status.as_u16(), %message, "backend request failed");
            return Err(ApiError::status(status.as_u16(), message));
        }
        Ok(payload.to_vec())
    }

    /// Send a body-less request and decode the JSON response.
    pub(super) async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<T, ApiError> {
        let payload = self.send::<()>(method, segments, None).await?;
        decode(&payload)
    }

    /// Send `body` as JSON and decode the JSON response.
    pub(super) async fn submit<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let payload = self.send(method, segments, Some(body)).await?;
        decode(&payload)
    }

    /// Send `body` as JSON and ignore the response body.
    pub(super) async fn submit_unit<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send(method, segments, Some(body)).await.map(drop)
    }

    /// Send a `DELETE`; any success status counts as deleted.
    pub(super) async fn delete(&self, segments: &[&str]) -> Result<(), ApiError> {
        self.send::<()>(Method::DELETE, segments, None)
            .await
            .map(drop)
    }
}

fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(payload)
        .map_err(|error| ApiError::decode(format!("invalid JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::transport(format!("request timed out: {error}"))
    } else {
        ApiError::transport(error.to_string())
    }
}

/// Turn a failed response into one human-readable message.
///
/// JSON bodies contribute their `message` (or else `error`) field, other
/// bodies their raw text. Anything unusable falls back to the status line.
pub(crate) fn error_message(status: StatusCode, content_type: Option<&str>, body: &[u8]) -> String {
    let fallback = || {
        format!(
            "Request failed with status {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        )
    };

    if content_type.is_some_and(|value| value.contains("application/json")) {
        return match serde_json::from_slice::<Value>(body) {
            Ok(value) => message_field(&value, "message")
                .or_else(|| message_field(&value, "error"))
                .unwrap_or_else(fallback),
            Err(error) => {
                warn!(%error, "failed to parse error response");
                fallback()
            }
        };
    }

    let text = String::from_utf8_lossy(body);
    if text.is_empty() {
        fallback()
    } else {
        text.into_owned()
    }
}

fn message_field(body: &Value, field: &str) -> Option<String> {
    match body.get(field)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Array(items) if !items.is_empty() => Some(
            items
                .iter()
                .map(|item| item.as_str().map_or_else(|| item.to_string(), str::to_owned))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        value @ (Value::Bool(true) | Value::Object(_)) => Some(value.to_string()),
        Value::Number(number) if number.as_f64().is_some_and(|n| n.abs() > 0.0) => {
            Some(number.to_string())
        }
        _ => None,
    }
}
