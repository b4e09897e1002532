use clap::Parser;
use document_intelligence::{
    config::{EmbeddingProvider, Settings},
    loader::{DocumentLoader, FileLoader},
    logging, DocumentAnalyzer,
};
use std::path::PathBuf;
use tracing::info;

/// Analyze a document and print the report as JSON
#[derive(Debug, Parser)]
#[command(name = "analyze", version)]
struct Cli {
    /// Path to a UTF-8 text, markdown or PDF document
    path: PathBuf,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Build the retrieval index with offline hashing embeddings
    #[arg(long)]
    offline_embeddings: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_tracing();

    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    if cli.offline_embeddings {
        settings.embedding_provider = EmbeddingProvider::Hashing;
    }

    let document_text = FileLoader.load(&cli.path).await?;
    let analyzer = DocumentAnalyzer::from_settings(&settings)?;

    info!(path = %cli.path.display(), "Running multi-agent analysis");

    let output = match analyzer.analyze(&document_text).await {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            return Err(e.into());
        }
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);

    Ok(())
}
