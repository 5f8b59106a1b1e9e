use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{RewriteStyle, Tone};

/// Configuration for rephrase API requests.
///
/// Bundles the access credential with the endpoint it belongs to, so tests
/// and deployments behind a proxy can point at a different server without
/// touching the client code.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    api_key: String,
    endpoint: String,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// The single failure surfaced by [`rephrase`].
///
/// Transport failures, non-success statuses and malformed response bodies
/// all collapse into this one kind; callers surface the message and never
/// retry on their own.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RephraseFailed {
    message: String,
}

impl RephraseFailed {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outbound wire format.
#[derive(Debug, Serialize)]
struct RephraseRequest<'a> {
    key: &'a str,
    text: &'a str,
    mapping: RewriteStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    tone_mapping: Option<Tone>,
}

/// Success response shape: `{"result": [...]}`. A missing `result` field
/// deserializes to an empty list.
#[derive(Debug, Deserialize)]
struct RephraseResponse {
    #[serde(default)]
    result: Vec<String>,
}

/// Best-effort failure response shape: `{"msg": "..."}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
}

/// Request alternative phrasings for `text`.
///
/// One outbound POST per invocation, all-or-nothing: no retries, no
/// partial results. `tone` travels in the payload only when `style`
/// requires it.
pub async fn rephrase(
    config: &ApiConfig,
    text: &str,
    style: RewriteStyle,
    tone: Tone,
) -> Result<Vec<String>, RephraseFailed> {
    let payload = RephraseRequest {
        key: config.api_key(),
        text,
        mapping: style,
        tone_mapping: style.needs_tone().then_some(tone),
    };

    let client = reqwest::Client::new();
    let response = client
        .post(config.endpoint())
        .json(&payload)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!("rephrase request failed: {e}");
            RephraseFailed::new(format!("Request failed: {e}"))
        })?;

    let status = response.status();
    if !status.is_success() {
        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = body.msg.unwrap_or_else(|| format!("API error: {status}"));
        tracing::warn!(%status, "rephrase request rejected: {message}");
        return Err(RephraseFailed::new(message));
    }

    let body: RephraseResponse = response.json().await.map_err(|e| {
        tracing::warn!("rephrase response did not parse: {e}");
        RephraseFailed::new("Received an invalid response from the rephrase service")
    })?;

    Ok(body.result)
}
