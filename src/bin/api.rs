use document_intelligence::{api::start_server, config::Settings, logging, DocumentAnalyzer};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_tracing();

    let settings = Settings::from_env()?;

    info!("Document Intelligence - API Server");
    info!("Port: {}", settings.port);

    let analyzer = Arc::new(DocumentAnalyzer::from_settings(&settings)?);

    info!(
        baseline_model = %settings.baseline_model,
        advanced_model = %settings.advanced_model,
        "Analyzer initialized"
    );

    start_server(analyzer, settings.port).await?;

    Ok(())
}
