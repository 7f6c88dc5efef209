//! HTTP request handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use billscan_ocr::{LineItem, RecognitionBackend};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

/// Payload of `POST /v1/bills`: a URL pointing at the uploaded bill image.
#[derive(Debug, Deserialize)]
pub struct BillSubmission {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Run OCR on the submitted image and return its reconstructed line items.
pub async fn post_bill<R: RecognitionBackend + 'static>(
    State(state): State<AppState<R>>,
    payload: Result<Json<BillSubmission>, JsonRejection>,
) -> Result<Json<Vec<LineItem>>, ApiError> {
    let Json(bill) = payload.map_err(|rejection| {
        tracing::debug!("Rejected bill payload: {rejection}");
        ApiError::BadPayload
    })?;

    let url = bill.url.as_deref().unwrap_or_default();
    let result = state.pipeline.process_url(url).await?;
    Ok(Json(result.line_items))
}
