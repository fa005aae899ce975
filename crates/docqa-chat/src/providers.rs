//! External LLM provider clients.
//!
//! OpenAI and Groq share the Chat Completions format. Anthropic uses the
//! Messages API, which takes the system prompt as a top-level field and
//! returns a list of content blocks. [`ChatModel::extract_text`] normalizes
//! both response shapes to a single string.

use async_trait::async_trait;
use docqa_core::{Error, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::types::{ChatMessage, LLMProvider, Role};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// A chat model handle: sends a populated prompt and normalizes the reply.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Provider reported in results (e.g. `groq`).
    fn provider_name(&self) -> &str;

    /// Model identifier reported in results.
    fn model_name(&self) -> &str;

    /// Name of the concrete implementation, used to key the prompt cache.
    fn client_name(&self) -> &str;

    /// Send the messages and return the provider's raw JSON response.
    async fn generate(&self, messages: &[ChatMessage]) -> Result<Value>;

    /// Pull the answer text out of a raw response.
    fn extract_text(&self, response: &Value) -> Result<String>;
}

/// Non-2xx reply from a provider API.
#[derive(Debug, thiserror::Error)]
#[error("{provider} API error {status}: {body}")]
pub struct ApiError {
    pub provider: LLMProvider,
    pub status: u16,
    pub body: String,
}

/// Provider reply that does not have the expected shape.
#[derive(Debug, thiserror::Error)]
#[error("Malformed {provider} response: {reason}")]
pub struct MalformedResponse {
    pub provider: LLMProvider,
    pub reason: String,
}

/// Concrete handle for one of the hosted providers.
#[derive(Clone)]
pub struct ProviderModel {
    provider: LLMProvider,
    model: String,
    api_key: String,
    temperature: f64,
    max_tokens: Option<u32>,
    client: Client,
}

impl std::fmt::Debug for ProviderModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderModel")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl ProviderModel {
    pub fn new(
        client: Client,
        provider: LLMProvider,
        model: impl Into<String>,
        api_key: impl Into<String>,
        temperature: f64,
        max_tokens: Option<u32>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            api_key: api_key.into(),
            temperature,
            max_tokens,
            client,
        }
    }

    pub fn provider(&self) -> LLMProvider {
        self.provider
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    /// JSON body sent to the provider for `messages`.
    pub fn request_body(&self, messages: &[ChatMessage]) -> Value {
        match self.provider {
            LLMProvider::OpenAI | LLMProvider::Groq => {
                openai_compat_body(&self.model, messages, self.temperature, self.max_tokens)
            }
            LLMProvider::Anthropic => {
                anthropic_body(&self.model, messages, self.temperature, self.max_tokens)
            }
        }
    }

    fn request(&self) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .post(self.provider.endpoint())
            .header("Content-Type", "application/json");
        match self.provider {
            LLMProvider::OpenAI | LLMProvider::Groq => {
                builder.header("Authorization", format!("Bearer {}", self.api_key))
            }
            LLMProvider::Anthropic => builder
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION),
        }
    }
}

#[async_trait]
impl ChatModel for ProviderModel {
    fn provider_name(&self) -> &str {
        self.provider.as_str()
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn client_name(&self) -> &str {
        self.provider.client_name()
    }

    async fn generate(&self, messages: &[ChatMessage]) -> Result<Value> {
        let body = self.request_body(messages);
        debug!("Calling {} with model {}", self.provider, self.model);

        let response = self
            .request()
            .json(&body)
            .send()
            .await
            .map_err(Error::model_invocation)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::model_invocation(ApiError {
                provider: self.provider,
                status,
                body,
            }));
        }

        response.json::<Value>().await.map_err(Error::model_invocation)
    }

    fn extract_text(&self, response: &Value) -> Result<String> {
        let text = match self.provider {
            LLMProvider::OpenAI | LLMProvider::Groq => openai_compat_text(response),
            LLMProvider::Anthropic => anthropic_text(response),
        };
        text.ok_or_else(|| {
            Error::model_invocation(MalformedResponse {
                provider: self.provider,
                reason: "no text content in response".into(),
            })
        })
    }
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

/// Chat Completions body (OpenAI, Groq).
pub fn openai_compat_body(
    model: &str,
    messages: &[ChatMessage],
    temperature: f64,
    max_tokens: Option<u32>,
) -> Value {
    let msgs: Vec<Value> = messages
        .iter()
        .map(|m| json!({"role": role_name(m.role), "content": m.content}))
        .collect();

    let mut body = json!({
        "model": model,
        "messages": msgs,
        "temperature": temperature,
        "stream": false,
    });
    if let Some(max) = max_tokens {
        body["max_tokens"] = json!(max);
    }
    body
}

/// Messages API body (Anthropic). System messages are lifted out of the list.
pub fn anthropic_body(
    model: &str,
    messages: &[ChatMessage],
    temperature: f64,
    max_tokens: Option<u32>,
) -> Value {
    let system: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .collect();

    let conv_msgs: Vec<Value> = messages
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| json!({"role": role_name(m.role), "content": m.content}))
        .collect();

    let mut body = json!({
        "model": model,
        "messages": conv_msgs,
        "temperature": temperature,
        "max_tokens": max_tokens.unwrap_or(crate::config::DEFAULT_MAX_TOKENS),
    });
    if !system.is_empty() {
        body["system"] = json!(system.join("\n\n"));
    }
    body
}

/// `choices[0].message.content`
pub fn openai_compat_text(response: &Value) -> Option<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
}

/// Concatenation of every `text` content block.
pub fn anthropic_text(response: &Value) -> Option<String> {
    let blocks = response["content"].as_array()?;
    let texts: Vec<&str> = blocks
        .iter()
        .filter(|b| b["type"].as_str() == Some("text"))
        .filter_map(|b| b["text"].as_str())
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}
