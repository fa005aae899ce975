//! Model configuration and provider selection.
//!
//! Configuration is re-read from the environment on every call, so a change
//! to `MODEL_PROVIDER` or a key takes effect on the next request.

use std::sync::Arc;

use docqa_core::{EnvLookup, Error, ProcessEnv, Result};
use reqwest::Client;
use tracing::info;

use crate::providers::{ChatModel, ProviderModel};
use crate::types::{LLMProvider, ModelInfo};

pub const PROVIDER_VAR: &str = "MODEL_PROVIDER";
pub const TEMPERATURE_VAR: &str = "TEMPERATURE";
pub const MAX_TOKENS_VAR: &str = "MAX_TOKENS";

pub const DEFAULT_PROVIDER: &str = "groq";
pub const DEFAULT_TEMPERATURE: f64 = 0.1;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Fully resolved model settings, minus the credential.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub provider: LLMProvider,
    pub model: String,
    pub temperature: f64,
    /// Only set for providers that require it.
    pub max_tokens: Option<u32>,
}

/// Something that can hand out model handles.
pub trait ModelSource: Send + Sync {
    /// Build a model handle from current configuration.
    fn create(&self) -> Result<Arc<dyn ChatModel>>;

    /// Report what `create` would build, without checking credentials.
    fn describe(&self) -> ModelInfo;
}

/// Builds provider handles from environment variables.
pub struct ModelFactory {
    env: Arc<dyn EnvLookup>,
    client: Client,
}

impl Default for ModelFactory {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ModelFactory {
    /// Factory over the live process environment.
    pub fn from_env() -> Self {
        Self::with_env(ProcessEnv)
    }

    /// Factory over an explicit variable source.
    pub fn with_env(env: impl EnvLookup + 'static) -> Self {
        Self {
            env: Arc::new(env),
            client: Client::new(),
        }
    }

    fn provider_name(&self) -> String {
        self.env
            .get(PROVIDER_VAR)
            .map(|p| p.to_lowercase())
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string())
    }

    fn raw_temperature(&self) -> Option<String> {
        self.env.get(TEMPERATURE_VAR)
    }

    fn temperature(&self) -> Result<f64> {
        let Some(raw) = self.raw_temperature() else {
            return Ok(DEFAULT_TEMPERATURE);
        };
        match raw.parse::<f64>() {
            Ok(t) if (0.0..=2.0).contains(&t) => Ok(t),
            _ => Err(Error::InvalidConfig(format!(
                "Invalid temperature: {}. Must be between 0 and 2.",
                raw
            ))),
        }
    }

    fn max_tokens(&self) -> u32 {
        self.env
            .get(MAX_TOKENS_VAR)
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_MAX_TOKENS)
    }

    fn model_name(&self, provider: LLMProvider) -> String {
        self.env
            .first_of(provider.model_vars())
            .unwrap_or_else(|| provider.default_model_name().to_string())
    }

    fn unsupported(name: String) -> Error {
        Error::UnsupportedProvider {
            provider: name,
            supported: LLMProvider::ALL.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Resolve settings and the API key for the configured provider.
    pub fn resolve(&self) -> Result<(ModelConfig, String)> {
        let name = self.provider_name();
        let temperature = self.temperature()?;
        let provider = LLMProvider::parse(&name).ok_or_else(|| Self::unsupported(name.clone()))?;

        let vars = provider.required_credential_vars();
        let api_key = self.env.first_of(vars).ok_or_else(|| Error::MissingCredential {
            variable: credential_label(vars),
            provider: name,
        })?;

        let config = ModelConfig {
            provider,
            model: self.model_name(provider),
            temperature,
            max_tokens: provider.requires_max_tokens().then(|| self.max_tokens()),
        };
        Ok((config, api_key))
    }
}

impl ModelSource for ModelFactory {
    fn create(&self) -> Result<Arc<dyn ChatModel>> {
        let (config, api_key) = self.resolve()?;
        info!(
            "Using {} model {} (temperature={})",
            config.provider, config.model, config.temperature
        );
        Ok(Arc::new(ProviderModel::new(
            self.client.clone(),
            config.provider,
            config.model,
            api_key,
            config.temperature,
            config.max_tokens,
        )))
    }

    fn describe(&self) -> ModelInfo {
        let provider = self.provider_name();
        let model = LLMProvider::parse(&provider)
            .map(|p| self.model_name(p))
            .unwrap_or_else(|| "unknown".to_string());
        let temperature = match self.raw_temperature() {
            Some(raw) => raw.parse::<f64>().ok(),
            None => Some(DEFAULT_TEMPERATURE),
        };
        ModelInfo {
            provider,
            model,
            temperature,
        }
    }
}

/// `A` or `A (or B)` for error messages.
fn credential_label(vars: &[&str]) -> String {
    match vars {
        [] => String::new(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (or {})", first, rest.join(" or ")),
    }
}
