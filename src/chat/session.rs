//! Chat session state: the ordered message list and the loading flag.
//!
//! SYSTEM CONTEXT
//! ==============
//! A turn is split in two so the caller owns the await: `begin_turn` records
//! the question and produces the request, `finish_turn` records the answer
//! or the failure. Between the two the session is loading and refuses new
//! input.

use super::message::{Message, Role};
use crate::analyst::{AnalystApi, AnalystError, ChatReply, ChatRequest};

/// Assistant message that opens every session.
pub const GREETING: &str = "Hello! I'm your AI Financial Analyst. I can provide stock prices, company news, and market analysis. How can I help you today?";

/// Prefix for assistant messages that report a failed request.
pub const ERROR_PREFIX: &str = "Sorry, something went wrong: ";

/// A canned question offered before the first turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamplePrompt {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub question: &'static str,
}

pub const EXAMPLE_PROMPTS: [ExamplePrompt; 2] = [
    ExamplePrompt {
        title: "Get Latest Earnings",
        subtitle: "for NVIDIA (NVDA)",
        question: "What are the latest earnings for NVDA?",
    },
    ExamplePrompt {
        title: "Show Stock Chart",
        subtitle: "for Apple (AAPL)",
        question: "Show me a stock price chart for AAPL",
    },
];

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<Message>,
    loading: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self { messages: vec![Message::assistant(GREETING)], loading: false }
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True until the first question is asked.
    #[must_use]
    pub fn shows_examples(&self) -> bool {
        self.messages.len() == 1
    }

    /// Look up an example prompt by its 1-based number.
    #[must_use]
    pub fn example(number: usize) -> Option<&'static ExamplePrompt> {
        number.checked_sub(1).and_then(|index| EXAMPLE_PROMPTS.get(index))
    }

    /// Start a turn for `input`.
    ///
    /// Returns `None` without touching the session when the trimmed input is
    /// empty or a request is already pending. Otherwise appends the user
    /// message, marks the session loading, and returns the request to send.
    /// The history covers the messages before this question, minus the
    /// leading greeting.
    pub fn begin_turn(&mut self, input: &str) -> Option<ChatRequest> {
        let question = input.trim();
        if question.is_empty() || self.loading {
            return None;
        }

        let chat_history = self.history_for_api();
        self.messages.push(Message::user(question));
        self.loading = true;

        Some(ChatRequest { question: question.to_owned(), chat_history })
    }

    /// Record the outcome of the pending turn and return the index of the
    /// appended assistant message.
    pub fn finish_turn(&mut self, result: Result<ChatReply, AnalystError>) -> usize {
        let message = match result {
            Ok(reply) => {
                let chart = reply.chart_image.filter(|encoded| !encoded.trim().is_empty());
                Message::assistant(reply.text_response).with_chart(chart)
            }
            Err(err) => {
                tracing::warn!(error = %err, "question failed");
                Message::assistant(format!("{ERROR_PREFIX}{err}"))
            }
        };
        self.messages.push(message);
        self.loading = false;
        self.messages.len() - 1
    }

    /// Run one complete turn against `api`.
    ///
    /// Returns the index of the assistant message, or `None` when the input
    /// was rejected by [`ChatSession::begin_turn`].
    pub async fn exchange<A>(&mut self, api: &A, input: &str) -> Option<usize>
    where
        A: AnalystApi + ?Sized,
    {
        let request = self.begin_turn(input)?;
        let result = api.ask(&request).await;
        Some(self.finish_turn(result))
    }

    fn history_for_api(&self) -> Vec<(Role, String)> {
        let skip = usize::from(self.messages.first().is_some_and(|m| m.role == Role::Assistant));
        self.messages[skip..]
            .iter()
            .map(|m| (m.role, m.text.clone()))
            .collect()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
