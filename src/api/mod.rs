//! Analysis service client.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`AnalysisClient`] owns the request/response contract: one JSON `POST` per
//! call carrying the text and an `X-API-Key` header, no retries, no caching.
//! The wire itself sits behind [`Transport`] so the native build (`reqwest`)
//! and the browser popup (`fetch`) share the same status handling.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx answers become `NetworkOrServerError` with the server's `detail`
//! when it sent one. A 2xx body that is not JSON is NOT an error here: the
//! client hands back an absent payload and the renderer reports it as
//! malformed.

#[cfg(feature = "native")]
pub mod http;

use serde_json::Value;

use crate::error::FailureReason;
use crate::types::AnalysisRequest;

/// Header carrying the API key, sent verbatim.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Status and raw body of an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors raised before an HTTP status was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Request(String),

    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

/// Sends one JSON `POST` and returns whatever the server answered.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn post_json(&self, url: &str, api_key: &str, body: String) -> Result<HttpReply, TransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("API key not configured: {0}")]
pub struct KeyError(pub String);

/// Resolves the API key right before each request.
#[async_trait::async_trait(?Send)]
pub trait KeyResolver {
    async fn resolve(&self) -> Result<String, KeyError>;
}

/// A key known up front.
#[derive(Clone)]
pub struct StaticKey(pub String);

#[async_trait::async_trait(?Send)]
impl KeyResolver for StaticKey {
    async fn resolve(&self) -> Result<String, KeyError> {
        Ok(self.0.clone())
    }
}

/// A key read from an environment variable at request time.
#[derive(Debug, Clone)]
pub struct EnvKey {
    var: String,
}

impl EnvKey {
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait::async_trait(?Send)]
impl KeyResolver for EnvKey {
    async fn resolve(&self) -> Result<String, KeyError> {
        match std::env::var(&self.var) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(KeyError(format!("set {}", self.var))),
        }
    }
}

pub struct AnalysisClient<T, K> {
    transport: T,
    keys: K,
    endpoint: String,
}

impl<T: Transport, K: KeyResolver> AnalysisClient<T, K> {
    pub fn new(transport: T, keys: K, endpoint: impl Into<String>) -> Self {
        Self { transport, keys, endpoint: endpoint.into() }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `text` for analysis.
    ///
    /// Returns `Ok(None)` when the server answered 2xx with a body that is
    /// not JSON.
    ///
    /// # Errors
    ///
    /// Returns `NetworkOrServerError` when the key is missing, the request
    /// cannot complete, or the server answers with a non-2xx status.
    pub async fn analyze(&self, text: &str) -> Result<Option<Value>, FailureReason> {
        let api_key = self.keys.resolve().await.map_err(|error| {
            tracing::warn!(%error, "no API key available; request not sent");
            FailureReason::network(error.to_string())
        })?;
        let body = serde_json::to_string(&AnalysisRequest::new(text))
            .map_err(|error| FailureReason::network(format!("failed to encode request: {error}")))?;

        tracing::info!(endpoint = %self.endpoint, chars = text.chars().count(), "sending analysis request");
        let reply = self
            .transport
            .post_json(&self.endpoint, &api_key, body)
            .await
            .map_err(|error| {
                tracing::warn!(%error, "analysis request failed in transit");
                FailureReason::network(error.to_string())
            })?;

        if !reply.is_success() {
            let detail = error_detail(&reply.body).unwrap_or_else(|| status_failed_message(reply.status));
            tracing::warn!(status = reply.status, %detail, "analysis request rejected");
            return Err(FailureReason::server(reply.status, detail));
        }

        tracing::info!(status = reply.status, bytes = reply.body.len(), "analysis response received");
        Ok(parse_payload(&reply.body))
    }
}

fn status_failed_message(status: u16) -> String {
    format!("Request failed with status {status}")
}

/// The string `detail` field of a JSON error body, if any.
fn error_detail(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return None;
    };
    let detail = value.get("detail")?.as_str()?.trim();
    (!detail.is_empty()).then(|| detail.to_owned())
}

fn parse_payload(body: &str) -> Option<Value> {
    match serde_json::from_str(body) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(%error, "analysis response is not JSON");
            None
        }
    }
}
