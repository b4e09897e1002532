//! Document analysis service
//!
//! Validates input, builds a per-request retrieval index and runs the
//! orchestrator. Shared immutably between concurrent requests; every request
//! owns its own index and memory.

use crate::agents::AgentRunner;
use crate::config::Settings;
use crate::error::PipelineError;
use crate::llm::{ModelBackend, ModelInvoker, OpenAiChatClient, RoutingPolicy};
use crate::models::FinalOutput;
use crate::orchestrator::Orchestrator;
use crate::retrieval::{build_embedding_client, EmbeddingClient, TextSplitter, VectorIndex};
use crate::Result;
use std::sync::Arc;
use tracing::info;

pub struct DocumentAnalyzer {
    orchestrator: Orchestrator,
    embedder: Arc<dyn EmbeddingClient>,
    splitter: TextSplitter,
}

impl DocumentAnalyzer {
    pub fn new(
        orchestrator: Orchestrator,
        embedder: Arc<dyn EmbeddingClient>,
        splitter: TextSplitter,
    ) -> Self {
        Self {
            orchestrator,
            embedder,
            splitter,
        }
    }

    /// Wire an analyzer from settings, using the supplied chat backend
    pub fn with_backend(settings: &Settings, backend: Arc<dyn ModelBackend>) -> Result<Self> {
        let invoker = ModelInvoker::new(
            backend,
            RoutingPolicy {
                threshold_chars: settings.tier_threshold_chars,
            },
            settings.request_timeout,
        );
        let runner = AgentRunner::new(invoker, settings.retrieval_top_k);

        Ok(Self::new(
            Orchestrator::new(runner),
            build_embedding_client(settings)?,
            TextSplitter::new(settings.chunk_size, settings.chunk_overlap),
        ))
    }

    /// Wire an analyzer against the configured OpenAI-compatible endpoint
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let backend = OpenAiChatClient::from_settings(settings)?;
        Self::with_backend(settings, Arc::new(backend))
    }

    pub async fn analyze(&self, document_text: &str) -> Result<FinalOutput> {
        if document_text.trim().is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let index =
            VectorIndex::build(document_text, &self.splitter, self.embedder.clone()).await?;

        info!(chunks = index.len(), "Index ready, starting pipeline");

        self.orchestrator.run(document_text, &index).await
    }
}
