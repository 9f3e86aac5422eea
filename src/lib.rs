//! Terminal chat client for the AI Financial Analyst service.
//!
//! DESIGN
//! ======
//! A thin presentational client: collect a question, post it with the prior
//! conversation, print the answer. One request is in flight at a time and
//! the conversation lives only in memory.

pub mod analyst;
pub mod chat;
pub mod config;
pub mod render;
pub mod repl;
