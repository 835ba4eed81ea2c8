//! Natural-language to boolean-expression oracles
//!
//! An oracle turns a question such as "verses about faith and works" into a
//! keyword expression such as `faith + works`. The query engine treats it as
//! an untrusted black box: any error or empty answer sends the resolver down
//! its fallback path.

use crate::error::{OracleError, OracleResult};
use crate::provider::{ChatOptions, ChatProvider, ProviderKind};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;
use verse_core::prefix::{strip_prefix, ORACLE_PREFIXES};

/// Translates natural language into a boolean keyword expression
#[async_trait]
pub trait ExpressionOracle: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Translate `question` into an expression using `+`, `,` and parentheses
    async fn translate(&self, question: &str) -> OracleResult<String>;
}

const TRANSLATE_PROMPT: &str = "\
Convert the user's question into a boolean keyword search over verse text.
Reply with the expression only: no explanation, no preamble, no markdown.

Syntax:
  word          a keyword taken from the question
  a + b         both words (AND)
  a , b         either word (OR)
  ( ... )       grouping

Rules:
- Keep the user's own keywords. Only add synonyms joined with ',' when the
  user asks to expand, for synonyms, or for related words.
- Drop filler such as 'show me', 'verses about' and stopwords such as 'the',
  'of', 'to', 'in', 'a'.

Examples:
  verses about faith and works  ->  faith + works
  show me scriptures on light   ->  light
  expand on grace               ->  (grace, favor, mercy)";

const EXPLAIN_PROMPT: &str = "\
Explain the given verse in two or three sentences. Focus on its main point \
and its practical application. Be concise.";

/// Pull the expression out of a possibly chatty model reply.
///
/// Code fences are removed; blank lines, lines ending in `:` and lines that
/// start with "to " or "here" are dropped; the last remaining line wins. If
/// nothing remains the fence-stripped reply is returned as is.
pub fn clean_expression(reply: &str) -> String {
    let reply = reply.replace("```", "");
    let reply = reply.trim();

    let kept = reply.lines().map(str::trim).filter(|line| {
        let lower = line.to_lowercase();
        !line.is_empty()
            && !line.ends_with(':')
            && !lower.starts_with("to ")
            && !lower.starts_with("here")
    });

    match kept.last() {
        Some(line) => line.to_string(),
        None => reply.to_string(),
    }
}

/// Oracle backed by a chat completion provider
pub struct ChatOracle {
    provider: Arc<dyn ChatProvider>,
    name: String,
}

impl ChatOracle {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        let name = format!("{}:{}", provider.kind().as_str(), provider.model_name());
        Self { provider, name }
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    /// Explain a verse in a few sentences
    pub async fn explain(&self, reference: &str, text: &str) -> OracleResult<String> {
        if reference.trim().is_empty() || text.trim().is_empty() {
            return Err(OracleError::InvalidInput(
                "Missing reference or text".to_string(),
            ));
        }
        let user_prompt = format!("Verse: {}\nText: {}", reference, text);
        let explanation = self
            .provider
            .complete_with_system(EXPLAIN_PROMPT, &user_prompt, ChatOptions::explanation())
            .await?;
        Ok(explanation.trim().to_string())
    }
}

#[async_trait]
impl ExpressionOracle for ChatOracle {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(&self, question: &str) -> OracleResult<String> {
        let question = strip_prefix(question, &ORACLE_PREFIXES);
        if question.is_empty() {
            return Err(OracleError::InvalidInput("Empty question".to_string()));
        }

        let user_prompt = format!("User Question: {}", question);
        let reply = self
            .provider
            .complete_with_system(TRANSLATE_PROMPT, &user_prompt, ChatOptions::translation())
            .await?;

        let expression = clean_expression(&reply);
        debug!("Oracle {} translated {:?} into {:?}", self.name, question, expression);
        Ok(expression)
    }
}

/// Oracle that picks a provider on every call.
///
/// A local Ollama server is preferred when it answers the probe; otherwise
/// the first remote provider with a key is used.
#[cfg(feature = "openai")]
pub struct DiscoveringOracle {
    settings: crate::settings::OracleSettings,
}

#[cfg(feature = "openai")]
impl DiscoveringOracle {
    pub fn new(settings: crate::settings::OracleSettings) -> Self {
        Self { settings }
    }

    async fn current(&self) -> OracleResult<ChatOracle> {
        let provider = crate::discovery::discover_provider(&self.settings).await?;
        Ok(ChatOracle::new(provider))
    }

    /// Explain a verse with whichever provider is reachable
    pub async fn explain(&self, reference: &str, text: &str) -> OracleResult<String> {
        self.current().await?.explain(reference, text).await
    }
}

#[cfg(feature = "openai")]
#[async_trait]
impl ExpressionOracle for DiscoveringOracle {
    fn name(&self) -> &str {
        "auto"
    }

    async fn translate(&self, question: &str) -> OracleResult<String> {
        self.current().await?.translate(question).await
    }
}

/// Deterministic oracle returning a fixed answer
pub struct StaticOracle {
    answer: OracleResult<String>,
    calls: AtomicUsize,
}

impl StaticOracle {
    /// Always answer with `expression`
    pub fn expression(expression: impl Into<String>) -> Self {
        Self {
            answer: Ok(expression.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with `error`
    pub fn failing(error: OracleError) -> Self {
        Self {
            answer: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always report that no provider is available
    pub fn unavailable() -> Self {
        Self::failing(OracleError::Unavailable("no provider configured".to_string()))
    }

    /// Number of translate calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExpressionOracle for StaticOracle {
    fn name(&self) -> &str {
        "static"
    }

    async fn translate(&self, _question: &str) -> OracleResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockChatProvider;

    #[test]
    fn test_clean_plain_expression() {
        assert_eq!(clean_expression("  grace + mercy \n"), "grace + mercy");
    }

    #[test]
    fn test_clean_markdown_fence() {
        assert_eq!(clean_expression("```\nlove + hope\n```"), "love + hope");
    }

    #[test]
    fn test_clean_chatty_reply() {
        let reply = "Here is the expression:\n\n(hope, trust) + (love, charity)";
        assert_eq!(clean_expression(reply), "(hope, trust) + (love, charity)");

        let reply = "To generate the search, I used:\nfaith + works";
        assert_eq!(clean_expression(reply), "faith + works");
    }

    #[test]
    fn test_clean_nothing_kept() {
        assert_eq!(clean_expression("Here:"), "Here:");
        assert_eq!(clean_expression(""), "");
    }

    #[tokio::test]
    async fn test_chat_oracle_strips_prefix() {
        let oracle = ChatOracle::new(Arc::new(MockChatProvider::new()));
        assert_eq!(oracle.name(), "mock:mock-llm");

        let expr = oracle.translate("ask: verses about grace").await.unwrap();
        assert_eq!(expr, "grace");
    }

    #[tokio::test]
    async fn test_chat_oracle_rejects_empty_question() {
        let oracle = ChatOracle::new(Arc::new(MockChatProvider::new()));
        let result = oracle.translate("sql:   ").await;
        assert!(matches!(result, Err(OracleError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_chat_oracle_explain() {
        let oracle = ChatOracle::new(Arc::new(MockChatProvider::new()));
        let text = oracle
            .explain("John 3:16", "For God so loved the world")
            .await
            .unwrap();
        assert!(!text.is_empty());

        let missing = oracle.explain("", "text").await;
        assert!(matches!(missing, Err(OracleError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_static_oracle() {
        let oracle = StaticOracle::expression("faith + works");
        assert_eq!(oracle.translate("anything").await.unwrap(), "faith + works");
        assert_eq!(oracle.translate("again").await.unwrap(), "faith + works");
        assert_eq!(oracle.calls(), 2);

        let oracle = StaticOracle::unavailable();
        assert!(matches!(
            oracle.translate("anything").await,
            Err(OracleError::Unavailable(_))
        ));
    }
}
