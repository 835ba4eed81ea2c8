//! Chat completion providers
//!
//! Every remote provider we talk to (Ollama, DeepSeek, Groq, OpenAI) speaks
//! the OpenAI chat-completions dialect, so one HTTP client covers all of them.
//! The mock provider is deterministic and needs no network.

use crate::error::{OracleError, OracleResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Supported provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Local Ollama server
    Ollama,
    /// DeepSeek API
    DeepSeek,
    /// Groq API
    Groq,
    /// OpenAI Chat API
    OpenAI,
    /// Mock provider for testing
    Mock,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Groq => "groq",
            ProviderKind::OpenAI => "openai",
            ProviderKind::Mock => "mock",
        }
    }
}

/// Configuration for one provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider type
    pub provider: ProviderKind,

    /// Model name (e.g., "deepseek-chat", "llama3.2")
    pub model: String,

    /// API key (for cloud providers)
    pub api_key: Option<String>,

    /// API base URL, without the `/chat/completions` suffix
    pub api_base_url: Option<String>,

    /// Timeout in seconds for API requests
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::mock()
    }
}

impl ProviderConfig {
    /// Local Ollama through its OpenAI-compatible endpoint
    pub fn ollama(base_url: &str) -> Self {
        Self {
            provider: ProviderKind::Ollama,
            model: "llama3.2".to_string(),
            // required by the API shape, ignored by Ollama
            api_key: Some("ollama".to_string()),
            api_base_url: Some(format!("{}/v1", base_url.trim_end_matches('/'))),
            timeout_secs: 30,
        }
    }

    /// DeepSeek chat
    pub fn deepseek(api_key: &str) -> Self {
        Self {
            provider: ProviderKind::DeepSeek,
            model: "deepseek-chat".to_string(),
            api_key: Some(api_key.to_string()),
            api_base_url: Some("https://api.deepseek.com".to_string()),
            timeout_secs: 30,
        }
    }

    /// Groq hosted Llama
    pub fn groq(api_key: &str) -> Self {
        Self {
            provider: ProviderKind::Groq,
            model: "llama-3.3-70b-versatile".to_string(),
            api_key: Some(api_key.to_string()),
            api_base_url: Some("https://api.groq.com/openai/v1".to_string()),
            timeout_secs: 30,
        }
    }

    /// OpenAI
    pub fn openai(api_key: &str) -> Self {
        Self {
            provider: ProviderKind::OpenAI,
            model: "gpt-3.5-turbo".to_string(),
            api_key: Some(api_key.to_string()),
            api_base_url: Some("https://api.openai.com/v1".to_string()),
            timeout_secs: 30,
        }
    }

    /// Mock provider (testing)
    pub fn mock() -> Self {
        Self {
            provider: ProviderKind::Mock,
            model: "mock-llm".to_string(),
            api_key: None,
            api_base_url: None,
            timeout_secs: 10,
        }
    }

    /// Builder: override the model
    pub fn model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Builder: override the request timeout
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Sampling options for a single request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChatOptions {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatOptions {
    /// Short, deterministic output for expression translation
    pub fn translation() -> Self {
        Self {
            max_tokens: 60,
            temperature: 0.0,
        }
    }

    /// A few sentences of prose
    pub fn explanation() -> Self {
        Self {
            max_tokens: 150,
            temperature: 0.3,
        }
    }
}

/// Message role in a chat conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// A message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Response from a chat completion
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// The generated content
    pub content: String,

    /// Model used for generation
    pub model: String,
}

/// Trait for chat completion providers
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider type
    fn kind(&self) -> ProviderKind;

    /// Model name
    fn model_name(&self) -> &str;

    /// Generate a chat completion
    async fn chat(&self, messages: &[ChatMessage], options: ChatOptions) -> OracleResult<ChatResponse>;

    /// Generate a completion with a system prompt
    async fn complete_with_system(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: ChatOptions,
    ) -> OracleResult<String> {
        let messages = vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_prompt),
        ];
        let response = self.chat(&messages, options).await?;
        debug!("{} completion from model {}", self.kind().as_str(), response.model);
        Ok(response.content)
    }
}

/// Words the mock provider drops when building an expression
const MOCK_NOISE: &[&str] = &[
    "a", "about", "an", "and", "bible", "does", "find", "for", "in", "is", "me", "of", "on",
    "say", "scripture", "scriptures", "show", "the", "to", "user", "question", "verse",
    "verses", "what",
];

/// Mock provider for testing.
///
/// Answers expression requests by dropping filler words from the question and
/// joining the rest with `+`; answers anything else with a fixed sentence.
pub struct MockChatProvider {
    model: String,
}

impl MockChatProvider {
    pub fn new() -> Self {
        info!("Created mock chat provider");
        Self {
            model: "mock-llm".to_string(),
        }
    }
}

impl Default for MockChatProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Mock
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn chat(&self, messages: &[ChatMessage], _options: ChatOptions) -> OracleResult<ChatResponse> {
        let user_content = messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .ok_or_else(|| OracleError::InvalidInput("No user message provided".to_string()))?;

        let content = if let Some(question) = user_content.strip_prefix("User Question:") {
            let terms: Vec<String> = question
                .split(|c: char| !c.is_ascii_alphanumeric())
                .filter(|w| !w.is_empty())
                .map(str::to_lowercase)
                .filter(|w| !MOCK_NOISE.contains(&w.as_str()))
                .collect();
            terms.join(" + ")
        } else {
            "This verse is a mock explanation.".to_string()
        };

        debug!("Mock chat response generated");

        Ok(ChatResponse {
            content,
            model: self.model.clone(),
        })
    }
}

/// Provider for any OpenAI-compatible chat-completions endpoint
#[cfg(feature = "openai")]
pub struct OpenAICompatibleProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

#[cfg(feature = "openai")]
impl OpenAICompatibleProvider {
    pub fn new(config: ProviderConfig) -> OracleResult<Self> {
        if config.api_key.is_none() {
            return Err(OracleError::NotConfigured(format!(
                "{} API key required",
                config.provider.as_str()
            )));
        }
        if config.api_base_url.is_none() {
            return Err(OracleError::NotConfigured(format!(
                "{} base URL required",
                config.provider.as_str()
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OracleError::Network(e.to_string()))?;

        info!(
            "Created {} chat provider with model {}",
            config.provider.as_str(),
            config.model
        );

        Ok(Self { config, client })
    }
}

#[cfg(feature = "openai")]
#[async_trait]
impl ChatProvider for OpenAICompatibleProvider {
    fn kind(&self) -> ProviderKind {
        self.config.provider
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn chat(&self, messages: &[ChatMessage], options: ChatOptions) -> OracleResult<ChatResponse> {
        if messages.is_empty() {
            return Err(OracleError::InvalidInput("No messages provided".to_string()));
        }

        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| OracleError::NotConfigured("API key missing".to_string()))?;

        let base_url = self
            .config
            .api_base_url
            .as_ref()
            .ok_or_else(|| OracleError::NotConfigured("base URL missing".to_string()))?;

        let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));

        #[derive(Serialize)]
        struct CompletionRequest<'a> {
            model: &'a str,
            messages: &'a [ChatMessage],
            max_tokens: u32,
            temperature: f32,
        }

        #[derive(Deserialize)]
        struct CompletionResponse {
            choices: Vec<Choice>,
            #[serde(default)]
            model: Option<String>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ResponseMessage,
        }

        #[derive(Deserialize)]
        struct ResponseMessage {
            #[serde(default)]
            content: Option<String>,
        }

        let request = CompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        debug!(
            "Sending chat request to {} with {} messages",
            self.config.provider.as_str(),
            messages.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| OracleError::Network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OracleError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OracleError::Api(error_text));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Serialization(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| OracleError::Parse("No choices in response".to_string()))?;

        Ok(ChatResponse {
            content: content.trim().to_string(),
            model: completion.model.unwrap_or_else(|| self.config.model.clone()),
        })
    }
}

/// Create a provider from configuration
pub fn create_provider(config: ProviderConfig) -> OracleResult<Arc<dyn ChatProvider>> {
    match config.provider {
        ProviderKind::Mock => Ok(Arc::new(MockChatProvider::new())),
        #[cfg(feature = "openai")]
        _ => Ok(Arc::new(OpenAICompatibleProvider::new(config)?)),
        #[cfg(not(feature = "openai"))]
        other => Err(OracleError::NotConfigured(format!(
            "{} provider needs the openai feature",
            other.as_str()
        ))),
    }
}
