//! API route definitions

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::handlers::AppState;
use crate::config::ServerConfig;

/// Create the application router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/static/app.js", get(handlers::app_js))
        .route("/health", get(handlers::health))
        .route("/process_pdf", post(handlers::process_pdf))
        .route("/query", post(handlers::query))
        .with_state(state)
}

/// Router with the middleware stack the server runs with
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    let mut app = api_routes(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(DefaultBodyLimit::max(server.max_upload_bytes)),
    );

    if server.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}
