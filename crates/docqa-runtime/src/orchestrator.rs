//! Orchestrator: validate -> load -> model -> chain -> invoke.

use std::sync::Arc;

use docqa_chat::{ChainAssembler, ModelFactory, ModelInfo, ModelSource, QaInputs};
use docqa_core::{Error, Result};
use docqa_ingest::DocumentLoader;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::types::{DocumentSource, QaRequest, QaResult};
use crate::validate::validate;

/// Answers questions about documents. Cheap to share behind an `Arc`.
pub struct Orchestrator {
    loader: DocumentLoader,
    models: Arc<dyn ModelSource>,
    assembler: ChainAssembler,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    /// Orchestrator reading model configuration from the process environment.
    pub fn new() -> Self {
        Self::with_model_source(Arc::new(ModelFactory::from_env()))
    }

    /// Orchestrator over an explicit model source.
    pub fn with_model_source(models: Arc<dyn ModelSource>) -> Self {
        Self {
            loader: DocumentLoader::new(),
            models,
            assembler: ChainAssembler::new(),
        }
    }

    pub fn assembler(&self) -> &ChainAssembler {
        &self.assembler
    }

    /// Current model configuration, for diagnostics.
    pub fn describe(&self) -> ModelInfo {
        self.models.describe()
    }

    /// Answer one request. The first failing stage ends the request.
    pub async fn answer(&self, request: QaRequest) -> Result<QaResult> {
        let span = info_span!("qa_request", request_id = %Uuid::new_v4());
        self.answer_inner(request).instrument(span).await
    }

    async fn answer_inner(&self, request: QaRequest) -> Result<QaResult> {
        let validated = validate(&request)?;
        let document = self.load_document(validated.source).await?;
        debug!("Document ready ({} chars)", document.len());

        let model = self.models.create()?;
        let chain = self.assembler.build(model.clone(), validated.prompt_type);
        let output = chain
            .invoke(&QaInputs::new(document, validated.question))
            .await?;

        info!(
            "Answered with {}/{} using {} prompt",
            model.provider_name(),
            model.model_name(),
            validated.prompt_type
        );

        Ok(QaResult {
            output,
            model: model.model_name().to_string(),
            provider: model.provider_name().to_string(),
            prompt_type: validated.prompt_type.to_string(),
        })
    }

    async fn load_document(&self, source: DocumentSource) -> Result<String> {
        match source {
            DocumentSource::Text(text) => Ok(text),
            DocumentSource::Path(path) => {
                let loader = self.loader;
                let task_path = path.clone();
                tokio::task::spawn_blocking(move || loader.load(&task_path))
                    .await
                    .map_err(|e| {
                        let ext = docqa_ingest::file::dotted_extension(&path);
                        Error::load(path, ext, e)
                    })?
            }
        }
    }
}
