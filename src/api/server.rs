//! HTTP server implementation

use std::sync::Arc;

use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::rag::RagService;
use crate::Result;

/// Start the API server and run until Ctrl-C
pub async fn serve_api(config: &AppConfig) -> Result<()> {
    info!("🚀 Starting DocRAG API server...");

    let rag = Arc::new(RagService::new(config)?);
    let state = AppState {
        rag,
        max_upload_bytes: config.server.max_upload_bytes,
    };

    if config.server.enable_cors {
        info!("✅ CORS enabled");
    }
    let app = routes::app(state, &config.server);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /             - Upload and question page");
    info!("  GET  /health       - Health check");
    info!("  POST /process_pdf  - Index PDF files (multipart field `pdf_files`)");
    info!("  POST /query        - Ask a question ({{\"question\": \"...\"}})");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
