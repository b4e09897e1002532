//! Error types for the document intelligence pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {

    // =============================
    // Run Errors (fatal to a run)
    // =============================

    #[error("Document text is empty")]
    EmptyInput,

    #[error("Retrieval failed: {0}")]
    RetrievalFailure(String),

    #[error("Model call failed: {0}")]
    ModelCallFailure(String),

    #[error("Aggregation failed: {0}")]
    AggregationFailure(String),

    // =============================
    // Setup Errors
    // =============================

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Document load error: {0}")]
    DocumentLoad(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PipelineError {
    /// True for failures caused by the caller's input rather than the pipeline.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::EmptyInput | PipelineError::DocumentLoad(_))
    }
}
