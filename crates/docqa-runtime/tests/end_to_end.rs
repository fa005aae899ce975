//! End-to-end tests for the answer flow, using a stub model that echoes the
//! populated prompt back instead of calling a provider.

use std::sync::Arc;

use async_trait::async_trait;
use docqa_chat::{ChatMessage, ChatModel, ModelInfo, ModelSource};
use docqa_core::{Error, Result};
use docqa_runtime::{Orchestrator, QaRequest};
use serde_json::{json, Value};

/// Replies with the substituted question and the document line it saw.
struct EchoModel;

#[async_trait]
impl ChatModel for EchoModel {
    fn provider_name(&self) -> &str {
        "echo"
    }

    fn model_name(&self) -> &str {
        "echo-large"
    }

    fn client_name(&self) -> &str {
        "EchoModel"
    }

    async fn generate(&self, messages: &[ChatMessage]) -> Result<Value> {
        let document = messages[0]
            .content
            .lines()
            .skip_while(|l| *l != "---")
            .nth(1)
            .unwrap_or_default()
            .to_string();
        let reply = format!("You asked \"{}\" about: {}", messages[1].content, document);
        Ok(json!({ "choices": [{ "message": { "content": reply } }] }))
    }

    fn extract_text(&self, response: &Value) -> Result<String> {
        response["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::model_invocation("missing content"))
    }
}

struct EchoSource;

impl ModelSource for EchoSource {
    fn create(&self) -> Result<Arc<dyn ChatModel>> {
        Ok(Arc::new(EchoModel))
    }

    fn describe(&self) -> ModelInfo {
        ModelInfo {
            provider: "echo".into(),
            model: "echo-large".into(),
            temperature: Some(0.1),
        }
    }
}

fn orchestrator() -> Orchestrator {
    Orchestrator::with_model_source(Arc::new(EchoSource))
}

#[tokio::test]
async fn test_concise_question_over_text() {
    let request = QaRequest::with_text("What is the deadline?", "The deadline is May 1.")
        .prompt_type("concise");

    let result = orchestrator().answer(request).await.unwrap();

    assert_eq!(result.prompt_type, "concise");
    assert_eq!(result.provider, "echo");
    assert_eq!(result.model, "echo-large");
    assert!(!result.output.is_empty());
    assert!(result.output.contains("What is the deadline?"));
    assert!(result.output.contains("The deadline is May 1."));
    assert!(!result.output.contains("## PERSONA"));
}

#[tokio::test]
async fn test_answer_from_csv_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dates.csv");
    std::fs::write(&path, "\nmilestone,May 1\n").unwrap();

    let result = orchestrator()
        .answer(QaRequest::with_path("When?", path.to_string_lossy()))
        .await
        .unwrap();

    assert_eq!(result.prompt_type, "default");
    assert!(result.output.ends_with("about: milestone,May 1"));
}

#[tokio::test]
async fn test_repeated_requests_do_not_share_answers() {
    let orch = orchestrator();

    let first = orch
        .answer(QaRequest::with_text("Q1", "Doc one").prompt_type("technical"))
        .await
        .unwrap();
    let second = orch
        .answer(QaRequest::with_text("Q2", "Doc two").prompt_type("technical"))
        .await
        .unwrap();

    assert_eq!(orch.assembler().cached_len(), 1);
    assert_eq!(first.output, "You asked \"Q1\" about: Doc one");
    assert_eq!(second.output, "You asked \"Q2\" about: Doc two");
}

#[tokio::test]
async fn test_invalid_prompt_type_rejected() {
    let err = orchestrator()
        .answer(QaRequest::with_text("Q", "Doc").prompt_type("poetic"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPromptType(_)));
}

/// The serialized result uses the camelCase field names callers expect:
/// { output, model, provider, promptType }
#[tokio::test]
async fn test_result_shape() {
    let result = orchestrator()
        .answer(QaRequest::with_text("Q", "Doc"))
        .await
        .unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert!(value["output"].is_string());
    assert!(value["model"].is_string());
    assert!(value["provider"].is_string());
    assert_eq!(value["promptType"], "default");
    assert_eq!(value.as_object().unwrap().len(), 4);
}
