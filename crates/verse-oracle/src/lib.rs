//! VerseDB Oracle
//!
//! Turns natural-language questions into boolean keyword expressions.
//!
//! # Overview
//!
//! - [`ExpressionOracle`] is the seam the query resolver depends on
//! - [`ChatOracle`] drives any [`ChatProvider`] (mock, or OpenAI-compatible
//!   HTTP providers with the `openai` feature)
//! - [`StaticOracle`] is a deterministic stand-in for tests and offline use
//! - `DiscoveringOracle` (feature `openai`) probes for a local Ollama server
//!   and falls back to DeepSeek, Groq or OpenAI

#[cfg(feature = "openai")]
pub mod discovery;
pub mod error;
pub mod oracle;
pub mod provider;
pub mod settings;

pub use error::{OracleError, OracleResult};
pub use oracle::{clean_expression, ChatOracle, ExpressionOracle, StaticOracle};
pub use provider::{
    create_provider, ChatMessage, ChatOptions, ChatProvider, ChatResponse, MessageRole,
    MockChatProvider, ProviderConfig, ProviderKind,
};
pub use settings::OracleSettings;

#[cfg(feature = "openai")]
pub use discovery::discover_provider;
#[cfg(feature = "openai")]
pub use oracle::DiscoveringOracle;
#[cfg(feature = "openai")]
pub use provider::OpenAICompatibleProvider;
