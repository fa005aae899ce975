//! Request and response types for one question-answering call.

use std::path::PathBuf;

use docqa_chat::PromptType;
use serde::{Deserialize, Serialize};

/// Incoming request, as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_type: Option<String>,
}

impl QaRequest {
    pub fn with_text(question: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            document_text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_path(question: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            document_path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn prompt_type(mut self, prompt_type: impl Into<String>) -> Self {
        self.prompt_type = Some(prompt_type.into());
        self
    }
}

/// Where the document body comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Path(PathBuf),
    Text(String),
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub question: String,
    pub source: DocumentSource,
    pub prompt_type: PromptType,
}

/// Answer plus the configuration that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaResult {
    pub output: String,
    pub model: String,
    pub provider: String,
    pub prompt_type: String,
}
