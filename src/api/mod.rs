//! HTTP API: the upload page, PDF ingestion and question answering

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use routes::app;
pub use server::serve_api;
