//! Analyst service wire types and errors.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::chat::Role;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while talking to the analyst service.
#[derive(Debug, thiserror::Error)]
pub enum AnalystError {
    /// The configured endpoint is not a valid URL.
    #[error("invalid API URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (connect, TLS, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("API Error: {detail}")]
    Api { status: u16, detail: String },

    /// A success response whose body is not the expected JSON.
    #[error("invalid response: {0}")]
    Parse(String),
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Body of `POST /chat`.
///
/// `chat_history` serializes as an array of `[role, text]` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    pub chat_history: Vec<(Role, String)>,
}

/// Success body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text_response: String,
    #[serde(default)]
    pub chart_image: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a success body.
///
/// # Errors
///
/// Returns [`AnalystError::Parse`] if `body` is not a JSON object of the
/// expected shape.
pub fn parse_reply(body: &str) -> Result<ChatReply, AnalystError> {
    serde_json::from_str(body).map_err(|e| AnalystError::Parse(e.to_string()))
}

/// Pick the user-facing detail for a non-success response.
///
/// Uses the body's `detail` field when it carries a value (strings verbatim,
/// other JSON re-serialized), then the status reason phrase, then the
/// numeric code. Empty strings, `null`, `false` and zero count as absent.
#[must_use]
pub fn error_detail(status: reqwest::StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned())
        .filter(|value| !is_blank(value));

    match detail {
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
        None => status
            .canonical_reason()
            .map_or_else(|| status.as_u16().to_string(), ToOwned::to_owned),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(text) => text.is_empty(),
        Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
        _ => false,
    }
}

// =============================================================================
// API TRAIT
// =============================================================================

/// Async seam over the analyst service. Enables fakes in tests.
#[async_trait::async_trait]
pub trait AnalystApi: Send + Sync {
    /// Send one question with its prior history.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalystError`] on transport failure, non-success status,
    /// or a malformed body.
    async fn ask(&self, request: &ChatRequest) -> Result<ChatReply, AnalystError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
