//! Request validation.

use std::path::PathBuf;

use docqa_chat::PromptType;
use docqa_core::{Error, Result};

use crate::types::{DocumentSource, QaRequest, ValidatedRequest};

/// Check required fields and the prompt type.
///
/// A document path wins over document text when both are given. Empty
/// strings count as absent.
pub fn validate(request: &QaRequest) -> Result<ValidatedRequest> {
    let mut problems = Vec::new();

    if request.question.trim().is_empty() {
        problems.push("question: must be a non-empty string".to_string());
    }

    let path = request.document_path.as_deref().filter(|p| !p.trim().is_empty());
    let text = request.document_text.as_deref().filter(|t| !t.is_empty());
    let source = match (path, text) {
        (Some(path), _) => Some(DocumentSource::Path(PathBuf::from(path))),
        (None, Some(text)) => Some(DocumentSource::Text(text.to_string())),
        (None, None) => {
            problems.push(
                "documentPath or documentText: provide either documentPath or documentText"
                    .to_string(),
            );
            None
        }
    };

    let source = match source {
        Some(source) if problems.is_empty() => source,
        _ => return Err(Error::Validation { fields: problems }),
    };

    let prompt_type = match request.prompt_type.as_deref() {
        None => PromptType::default(),
        Some(tag) => tag.parse::<PromptType>()?,
    };

    Ok(ValidatedRequest {
        question: request.question.clone(),
        source,
        prompt_type,
    })
}
