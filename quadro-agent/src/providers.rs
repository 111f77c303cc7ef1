//! Chat providers for the analysis agent.

use crate::error::{AgentError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Trait for chat-completion providers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Complete one user message under a system prompt; returns the raw
    /// completion text.
    async fn chat(&self, system: &str, user: &str) -> Result<String>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

/// Configuration for a chat provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatProviderConfig {
    /// Provider kind (groq, openai, mock)
    pub kind: String,

    /// API key (defaults to the GROQ_API_KEY env var)
    pub api_key: Option<String>,

    /// Model name
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    pub base_url: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ChatProviderConfig {
    fn default() -> Self {
        Self {
            kind: "groq".to_string(),
            api_key: std::env::var("GROQ_API_KEY").ok(),
            model: "llama-3.3-70b-versatile".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            temperature: 0.0,
            timeout_seconds: 60,
        }
    }
}

/// Create a provider from its configured kind.
pub fn create_provider(config: &ChatProviderConfig) -> Result<Box<dyn ChatProvider>> {
    match config.kind.to_lowercase().as_str() {
        "groq" | "openai" => Ok(Box::new(GroqProvider::new(config.clone())?)),
        "mock" => Ok(Box::new(MockProvider::default())),
        other => Err(AgentError::config(format!(
            "provedor desconhecido: {other}"
        ))),
    }
}

/// OpenAI-compatible chat provider; Groq hosts one of these.
pub struct GroqProvider {
    client: Client,
    config: ChatProviderConfig,
    api_key: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GroqProvider {
    pub fn new(config: ChatProviderConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AgentError::config("chave de API não configurada (defina GROQ_API_KEY)")
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }
}

#[async_trait]
impl ChatProvider for GroqProvider {
    async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.temperature,
        };

        debug!(model = %self.config.model, "enviando requisição de chat");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AgentError::provider("resposta vazia do modelo"))
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// Deterministic provider: replays scripted outcomes in order. Used by the
/// test suites and selectable as the `mock` provider kind.
#[derive(Default)]
pub struct MockProvider {
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that answers with the given texts, in order.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::default();
        for response in responses {
            provider.push_ok(response);
        }
        provider
    }

    pub fn push_ok(&self, response: impl Into<String>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Ok(response.into()));
        }
    }

    pub fn push_err(&self, message: impl Into<String>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Err(message.into()));
        }
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn chat(&self, _system: &str, _user: &str) -> Result<String> {
        let mut script = self
            .script
            .lock()
            .map_err(|_| AgentError::provider("mock script lock poisoned"))?;
        match script.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(AgentError::provider(message)),
            None => Err(AgentError::provider("mock script exhausted")),
        }
    }

    fn model(&self) -> &str {
        "mock"
    }
}
