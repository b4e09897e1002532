//! Retrieval of grounding excerpts
//!
//! The pipeline only depends on `RetrievalProvider::query`. How the
//! document is split and indexed lives behind it.

use crate::Result;
use async_trait::async_trait;
use tracing::debug;

pub mod embedding;
pub mod index;
pub mod splitter;

pub use embedding::{
    build_embedding_client, EmbeddingClient, HashingEmbeddingClient, OpenAiEmbeddingClient,
};
pub use index::VectorIndex;
pub use splitter::TextSplitter;

/// Source of document excerpts relevant to a query
#[async_trait]
pub trait RetrievalProvider: Send + Sync {
    /// Up to `k` excerpts, most relevant first
    async fn query(&self, text: &str, k: usize) -> Result<Vec<String>>;
}

/// Top-`k` excerpts for `query`, newline-joined, no deduplication
pub async fn retrieve_context(
    provider: &dyn RetrievalProvider,
    query: &str,
    k: usize,
) -> Result<String> {
    let excerpts = provider.query(query, k).await?;
    debug!(query, excerpts = excerpts.len(), "Retrieved context");
    Ok(excerpts.join("\n"))
}
