//! Chat message model.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the conversation. Messages have no identity beyond their
/// position in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    /// Base64-encoded PNG attached to an assistant reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_image: Option<String>,
}

impl Message {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into(), chart_image: None }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, text: text.into(), chart_image: None }
    }

    #[must_use]
    pub fn with_chart(mut self, chart_image: Option<String>) -> Self {
        self.chart_image = chart_image;
        self
    }
}
