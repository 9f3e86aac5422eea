//! Analyst — HTTP client for the financial-analysis chat service.
//!
//! DESIGN
//! ======
//! One `POST` per question, JSON in and out. No timeout, no retry: a slow
//! answer keeps the session loading until the service responds or the
//! connection drops.

pub mod types;

use reqwest::Url;

pub use types::{AnalystApi, AnalystError, ChatReply, ChatRequest};

/// Endpoint used when no override is configured.
pub const DEFAULT_API_URL: &str = "https://financial-agent-service-597955193973.us-central1.run.app/chat";

/// Concrete client for the analyst service.
pub struct AnalystClient {
    http: reqwest::Client,
    url: Url,
}

impl AnalystClient {
    /// Build a client that posts questions to `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` does not parse or the HTTP client fails to
    /// build.
    pub fn new(url: &str) -> Result<Self, AnalystError> {
        let url = Url::parse(url)
            .map_err(|e| AnalystError::InvalidUrl { url: url.to_owned(), reason: e.to_string() })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AnalystError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme `{}`", url.scheme()),
            });
        }
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AnalystError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url })
    }

    /// Return the endpoint questions are posted to.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn post(&self, request: &ChatRequest) -> Result<ChatReply, AnalystError> {
        tracing::debug!(url = %self.url, history = request.chat_history.len(), "sending question");

        let response = self
            .http
            .post(self.url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| AnalystError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalystError::Request(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "analyst service returned an error");
            return Err(AnalystError::Api { status: status.as_u16(), detail: types::error_detail(status, &body) });
        }

        let reply = types::parse_reply(&body)?;
        tracing::debug!(
            chars = reply.text_response.len(),
            chart = reply.chart_image.is_some(),
            "received answer"
        );
        Ok(reply)
    }
}

#[async_trait::async_trait]
impl AnalystApi for AnalystClient {
    async fn ask(&self, request: &ChatRequest) -> Result<ChatReply, AnalystError> {
        self.post(request).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
