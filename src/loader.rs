//! Document loading
//!
//! Text and markdown files are read as UTF-8. PDFs are parsed with `lopdf`
//! and their pages joined with `\n`. Anything else is rejected.

use crate::error::PipelineError;
use crate::Result;
use async_trait::async_trait;
use lopdf::Document;
use std::path::Path;
use tracing::{debug, info};

const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown"];

#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, path: &Path) -> Result<String>;
}

/// Loads UTF-8 text files and PDFs
pub struct FileLoader;

#[async_trait]
impl DocumentLoader for FileLoader {
    async fn load(&self, path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        let text = match extension.as_deref() {
            None => read_text(path).await?,
            Some(ext) if TEXT_EXTENSIONS.contains(&ext) => read_text(path).await?,
            Some("pdf") => read_pdf(path).await?,
            Some(other) => {
                return Err(PipelineError::DocumentLoad(format!(
                    "unsupported document format '.{}' ({}); convert it to text first",
                    other,
                    path.display()
                )));
            }
        };

        info!(path = %path.display(), chars = text.chars().count(), "Loaded document");
        Ok(text)
    }
}

async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| {
        PipelineError::DocumentLoad(format!("failed to read {}: {}", path.display(), e))
    })
}

async fn read_text(path: &Path) -> Result<String> {
    let bytes = read_bytes(path).await?;
    String::from_utf8(bytes).map_err(|_| {
        PipelineError::DocumentLoad(format!("{} is not valid UTF-8 text", path.display()))
    })
}

async fn read_pdf(path: &Path) -> Result<String> {
    let bytes = read_bytes(path).await?;
    let display = path.display().to_string();

    // lopdf parsing is CPU-bound and may panic on hostile input
    tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .map_err(|e| {
            PipelineError::DocumentLoad(format!("PDF extraction aborted for {}: {}", display, e))
        })?
}

/// Page texts in page order, joined with `\n`
fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    let document = Document::load_mem(bytes)
        .map_err(|e| PipelineError::DocumentLoad(format!("unreadable PDF: {}", e)))?;

    let pages = document.get_pages();
    debug!(pages = pages.len(), "Extracting PDF text");

    let mut texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        let text = document.extract_text(&[*page_number]).map_err(|e| {
            PipelineError::DocumentLoad(format!(
                "failed to extract text from PDF page {}: {}",
                page_number, e
            ))
        })?;
        texts.push(text);
    }

    Ok(texts.join("\n"))
}
