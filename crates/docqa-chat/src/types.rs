//! Provider identifiers and chat message types.

use serde::{Deserialize, Serialize};

/// LLM provider identifier.
///
/// Everything provider-specific about configuration hangs off this enum, so
/// adding a provider means adding a variant and filling in its arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    OpenAI,
    Anthropic,
    Groq,
}

impl LLMProvider {
    pub const ALL: [LLMProvider; 3] = [LLMProvider::OpenAI, LLMProvider::Anthropic, LLMProvider::Groq];

    /// Parse an already-normalized (lowercase, trimmed) provider name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "openai",
            LLMProvider::Anthropic => "anthropic",
            LLMProvider::Groq => "groq",
        }
    }

    /// Model used when no model variable is set.
    pub fn default_model_name(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "gpt-4o-mini",
            LLMProvider::Anthropic => "claude-3-5-sonnet-20241022",
            LLMProvider::Groq => "meta-llama/llama-4-maverick-17b-128e-instruct",
        }
    }

    /// Variables holding the API key, in lookup order.
    pub fn required_credential_vars(&self) -> &'static [&'static str] {
        match self {
            LLMProvider::OpenAI => &["OPENAI_API_KEY"],
            LLMProvider::Anthropic => &["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"],
            LLMProvider::Groq => &["GROQ_API_KEY"],
        }
    }

    /// Variables holding the model name, in lookup order.
    pub fn model_vars(&self) -> &'static [&'static str] {
        match self {
            LLMProvider::OpenAI => &["OPENAI_MODEL"],
            LLMProvider::Anthropic => &["ANTHROPIC_MODEL", "CLAUDE_MODEL"],
            LLMProvider::Groq => &["GROQ_MODEL"],
        }
    }

    /// Chat endpoint for this provider.
    pub fn endpoint(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "https://api.openai.com/v1/chat/completions",
            LLMProvider::Anthropic => "https://api.anthropic.com/v1/messages",
            LLMProvider::Groq => "https://api.groq.com/openai/v1/chat/completions",
        }
    }

    /// Name of the concrete client implementation, used as a cache key component.
    pub fn client_name(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "ChatOpenAI",
            LLMProvider::Anthropic => "ChatAnthropic",
            LLMProvider::Groq => "ChatGroq",
        }
    }

    /// Whether requests must carry `max_tokens`.
    pub fn requires_max_tokens(&self) -> bool {
        matches!(self, LLMProvider::Anthropic)
    }
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message of a populated prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Diagnostic view of the configured model. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub provider: String,
    pub model: String,
    /// `None` when `TEMPERATURE` does not parse as a number.
    pub temperature: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_providers() {
        assert_eq!(LLMProvider::parse("openai"), Some(LLMProvider::OpenAI));
        assert_eq!(LLMProvider::parse("anthropic"), Some(LLMProvider::Anthropic));
        assert_eq!(LLMProvider::parse("groq"), Some(LLMProvider::Groq));
        assert_eq!(LLMProvider::parse("claude"), None);
    }

    #[test]
    fn test_message_serializes_lowercase_role() {
        let json = serde_json::to_value(ChatMessage::system("hi")).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "hi");
    }
}
