//! Helper bot for D&D beginners.
//!
//! Serves static reference sections over a chat transport and answers
//! free-text questions with an Ollama completion, grounded in
//! vector-retrieved documents for the races, spells and classes
//! domains.

pub mod bot;
pub mod config;
pub mod content;
pub mod dispatch;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod prompt;
pub mod retrieval;
pub mod section;
pub mod session;
pub mod state;
pub mod transport;

pub use config::Config;
pub use dispatch::Dispatcher;
pub use section::{RagDomain, Section};
pub use session::{Session, SessionStore};
pub use state::AppState;
