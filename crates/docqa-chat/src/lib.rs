//! Document QA chat: prompt catalog, hosted LLM providers (OpenAI/Anthropic/Groq)
//! and the chain that ties a prompt to a model.
//!
//! LLM calls go to external APIs; no local model is required.

pub mod chain;
pub mod config;
pub mod prompts;
pub mod providers;
pub mod types;

pub use chain::{ChainAssembler, ChatPrompt, QaChain, QaInputs};
pub use config::{ModelConfig, ModelFactory, ModelSource};
pub use prompts::{PromptType, TemplatePair};
pub use providers::{ChatModel, ProviderModel};
pub use types::*;
