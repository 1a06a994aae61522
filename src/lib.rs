//! Advisor Chat - brand-scoped beauty advisor library
//!
//! This library provides the two halves of the advisor: a stateless relay
//! that forwards conversations to a hosted completion API, and a client-side
//! conversation session that persists its history and the user's profile.
//!
//! # Architecture
//!
//! - `relay`: axum handler forwarding `{messages}` upstream, CORS included
//! - `conversation`: session state, name detection, trimming, relay client
//! - `storage`: key/value persistence (sled, in-memory)
//! - `prompts`: the advisor system prompt
//! - `config`: configuration loading and validation
//! - `error`: error types and result aliases
//! - `cli` / `commands`: command-line interface
//!
//! # Example
//!
//! ```no_run
//! use advisor_chat::conversation::{ChatSession, HttpRelayClient};
//! use advisor_chat::storage::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let relay = HttpRelayClient::new("http://127.0.0.1:8787/")?;
//!     let mut session = ChatSession::open(MemoryStore::new());
//!     session.submit("Hi, my name is Ana. Which serum suits dry skin?", &relay).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod error;
pub mod message;
pub mod prompts;
pub mod relay;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use conversation::{ChatSession, Profile, SubmitOutcome};
pub use error::{AdvisorError, Result};
pub use message::{Message, Role};

#[cfg(test)]
pub mod test_utils;
