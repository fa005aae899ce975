//! QA chain assembly: prompt -> model -> text extraction.

use std::sync::Arc;

use dashmap::DashMap;
use docqa_core::Result;
use tracing::debug;

use crate::prompts::{PromptType, TemplatePair, DOCUMENT_PLACEHOLDER, QUESTION_PLACEHOLDER};
use crate::providers::ChatModel;
use crate::types::ChatMessage;

/// Values bound into the prompt placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaInputs {
    pub document: String,
    pub question: String,
}

impl QaInputs {
    pub fn new(document: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            question: question.into(),
        }
    }
}

/// A system + human prompt ready to be populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    prompt_type: PromptType,
    templates: TemplatePair,
}

impl ChatPrompt {
    pub fn compile(prompt_type: PromptType) -> Self {
        Self {
            prompt_type,
            templates: prompt_type.templates(),
        }
    }

    pub fn prompt_type(&self) -> PromptType {
        self.prompt_type
    }

    /// Substitute the inputs into the system and human templates.
    ///
    /// Each template is rendered on its own, so placeholder-like text inside
    /// the document or question is never expanded.
    pub fn format(&self, inputs: &QaInputs) -> Vec<ChatMessage> {
        let system = self
            .templates
            .system
            .replace(DOCUMENT_PLACEHOLDER, &inputs.document);
        let human = self
            .templates
            .human
            .replace(QUESTION_PLACEHOLDER, &inputs.question);
        vec![ChatMessage::system(system), ChatMessage::user(human)]
    }
}

/// A prompt bound to a model handle. Built per request.
#[derive(Clone)]
pub struct QaChain {
    prompt: Arc<ChatPrompt>,
    model: Arc<dyn ChatModel>,
}

impl QaChain {
    pub fn new(prompt: Arc<ChatPrompt>, model: Arc<dyn ChatModel>) -> Self {
        Self { prompt, model }
    }

    pub fn prompt(&self) -> &ChatPrompt {
        &self.prompt
    }

    pub fn model(&self) -> &Arc<dyn ChatModel> {
        &self.model
    }

    /// Run the chain. Model failures propagate unchanged.
    pub async fn invoke(&self, inputs: &QaInputs) -> Result<String> {
        let messages = self.prompt.format(inputs);
        let response = self.model.generate(&messages).await?;
        self.model.extract_text(&response)
    }
}

/// Builds [`QaChain`]s, reusing compiled prompts across requests.
///
/// Cache entries hold only the immutable prompt, keyed by
/// `{client}_{prompt_type}`; the model handle is bound fresh on every build.
#[derive(Debug, Default)]
pub struct ChainAssembler {
    cache: DashMap<String, Arc<ChatPrompt>>,
}

impl ChainAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&self, model: Arc<dyn ChatModel>, prompt_type: PromptType) -> QaChain {
        let key = format!("{}_{}", model.client_name(), prompt_type);
        let prompt = self
            .cache
            .entry(key)
            .or_insert_with(|| {
                debug!("Compiling {} prompt for {}", prompt_type, model.client_name());
                Arc::new(ChatPrompt::compile(prompt_type))
            })
            .clone();
        QaChain::new(prompt, model)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use async_trait::async_trait;
    use docqa_core::Error;
    use serde_json::{json, Value};

    /// Replies with the question it was asked and the document it was given.
    struct EchoModel;

    #[async_trait]
    impl ChatModel for EchoModel {
        fn provider_name(&self) -> &str {
            "echo"
        }
        fn model_name(&self) -> &str {
            "echo-1"
        }
        fn client_name(&self) -> &str {
            "EchoModel"
        }
        async fn generate(&self, messages: &[ChatMessage]) -> Result<Value> {
            let system = &messages[0].content;
            let question = &messages[1].content;
            let document = system.lines().skip_while(|l| *l != "---").nth(1).unwrap_or("");
            Ok(json!({"reply": format!("Q: {question} | D: {document}")}))
        }
        fn extract_text(&self, response: &Value) -> Result<String> {
            Ok(response["reply"].as_str().unwrap_or_default().to_string())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        fn provider_name(&self) -> &str {
            "failing"
        }
        fn model_name(&self) -> &str {
            "failing-1"
        }
        fn client_name(&self) -> &str {
            "FailingModel"
        }
        async fn generate(&self, _messages: &[ChatMessage]) -> Result<Value> {
            Err(Error::model_invocation("429 Too Many Requests"))
        }
        fn extract_text(&self, _response: &Value) -> Result<String> {
            unreachable!()
        }
    }

    #[test]
    fn test_format_binds_both_placeholders() {
        let prompt = ChatPrompt::compile(PromptType::Concise);
        let messages = prompt.format(&QaInputs::new("The deadline is May 1.", "What is the deadline?"));
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("The deadline is May 1."));
        assert!(!messages[0].content.contains(DOCUMENT_PLACEHOLDER));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "What is the deadline?");
    }

    #[test]
    fn test_format_does_not_expand_placeholders_in_inputs() {
        let prompt = ChatPrompt::compile(PromptType::Default);
        let messages = prompt.format(&QaInputs::new("literal {question} text", "about {document}?"));
        assert!(messages[0].content.contains("literal {question} text"));
        assert_eq!(messages[1].content, "about {document}?");
    }

    #[tokio::test]
    async fn test_cached_chain_answers_each_request() {
        let assembler = ChainAssembler::new();

        let first = assembler.build(Arc::new(EchoModel), PromptType::Concise);
        let a = first.invoke(&QaInputs::new("Alpha doc", "first?")).await.unwrap();

        let second = assembler.build(Arc::new(EchoModel), PromptType::Concise);
        let b = second.invoke(&QaInputs::new("Beta doc", "second?")).await.unwrap();

        assert_eq!(assembler.cached_len(), 1);
        assert_eq!(a, "Q: first? | D: Alpha doc");
        assert_eq!(b, "Q: second? | D: Beta doc");
    }

    #[test]
    fn test_cache_keyed_by_client_and_prompt_type() {
        let assembler = ChainAssembler::new();
        assembler.build(Arc::new(EchoModel), PromptType::Default);
        assembler.build(Arc::new(EchoModel), PromptType::Technical);
        assembler.build(Arc::new(FailingModel), PromptType::Default);
        assembler.build(Arc::new(EchoModel), PromptType::Default);
        assert_eq!(assembler.cached_len(), 3);

        assembler.clear_cache();
        assert_eq!(assembler.cached_len(), 0);
    }

    #[tokio::test]
    async fn test_model_error_propagates_unchanged() {
        let chain = ChainAssembler::new().build(Arc::new(FailingModel), PromptType::Default);
        let err = chain.invoke(&QaInputs::new("doc", "q")).await.unwrap_err();
        assert!(matches!(err, Error::ModelInvocation(_)));
        assert_eq!(err.to_string(), "429 Too Many Requests");
    }
}
