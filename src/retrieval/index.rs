//! In-memory vector index over document chunks

use crate::error::PipelineError;
use crate::retrieval::embedding::EmbeddingClient;
use crate::retrieval::splitter::TextSplitter;
use crate::retrieval::RetrievalProvider;
use crate::Result;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::info;

/// Chunks of one document with their embeddings. Built per request.
pub struct VectorIndex {
    chunks: Vec<String>,
    vectors: Vec<Vec<f32>>,
    embedder: Arc<dyn EmbeddingClient>,
}

impl VectorIndex {
    pub async fn build(
        document_text: &str,
        splitter: &TextSplitter,
        embedder: Arc<dyn EmbeddingClient>,
    ) -> Result<Self> {
        let chunks = splitter.split_text(document_text);

        let vectors = if chunks.is_empty() {
            Vec::new()
        } else {
            embedder.embed(&chunks).await?
        };

        if vectors.len() != chunks.len() {
            return Err(PipelineError::RetrievalFailure(format!(
                "embedded {} of {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        info!(chunks = chunks.len(), "Built retrieval index");

        Ok(Self {
            chunks,
            vectors,
            embedder,
        })
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[async_trait]
impl RetrievalProvider for VectorIndex {
    async fn query(&self, text: &str, k: usize) -> Result<Vec<String>> {
        if self.chunks.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_vector = self
            .embedder
            .embed(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                PipelineError::RetrievalFailure("no embedding returned for query".to_string())
            })?;

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, vector)| (i, cosine_similarity(&query_vector, vector)))
            .collect();

        // stable sort keeps document order among equal scores
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(i, _)| self.chunks[i].clone())
            .collect())
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
