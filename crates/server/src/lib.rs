//! HTTP service around the bill line-item reconstructor.
//!
//! Accepts a bill image URL, forwards it to the recognition service and
//! answers with the reconstructed line items as JSON.

pub mod config;
pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use billscan_ocr::{BillPipeline, RecognitionBackend};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub use config::{Cli, ServerConfig};
pub use error::ApiError;
pub use handlers::{health_check, post_bill, BillSubmission, HealthResponse};

/// Bill submissions only carry a URL.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// State shared across handlers
pub struct AppState<R: RecognitionBackend> {
    pub pipeline: Arc<BillPipeline<R>>,
}

impl<R: RecognitionBackend> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self { pipeline: Arc::clone(&self.pipeline) }
    }
}

impl<R: RecognitionBackend> AppState<R> {
    pub fn new(pipeline: BillPipeline<R>) -> Self {
        Self { pipeline: Arc::new(pipeline) }
    }
}

/// Build the API router with all endpoints
pub fn build_router<R: RecognitionBackend + 'static>(state: AppState<R>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/bills", post(post_bill::<R>))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start_server(addr: SocketAddr, router: Router) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await
}
