//! Chat domain: the message model and the session that owns it.
//!
//! DESIGN
//! ======
//! Keeps conversation state free of I/O. The session hands out a request
//! when a turn starts and takes the API result back when it ends, so the
//! terminal front-end decides how the network call is awaited.

pub mod message;
pub mod session;

pub use message::{Message, Role};
pub use session::{ChatSession, EXAMPLE_PROMPTS, ExamplePrompt, GREETING};
