//! Document Intelligence Pipeline
//!
//! Extracts a summary, dependency-aware action items and a risk report from
//! a long document by running three specialized model agents in sequence.
//! Each agent is grounded with retrieved excerpts and hands a short note to
//! the next.
//!
//! PIPELINE:
//! INIT → SUMMARY → ACTION → RISK → AGGREGATE → DONE

pub mod agents;
pub mod api;
pub mod audit;
pub mod config;
pub mod error;
pub mod llm;
pub mod loader;
pub mod logging;
pub mod memory;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod retrieval;
pub mod service;

pub use error::{PipelineError, Result};

// Re-export common types
pub use models::*;
pub use orchestrator::Orchestrator;
pub use parser::safe_json_load;
pub use service::DocumentAnalyzer;
