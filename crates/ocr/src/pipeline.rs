use serde::Serialize;
use thiserror::Error;

use crate::extract::LineItemReconstructor;
use crate::recognizer::{RecognitionBackend, RecognizeError};
use crate::types::LineItem;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Missing URL")]
    MissingUrl,
    #[error("OCR recognition failed: {0}")]
    Recognize(#[from] RecognizeError),
}

/// The result of a single bill processing run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillResult {
    pub language: String,
    pub orientation: String,
    pub line_items: Vec<LineItem>,
}

/// Orchestrates: validate URL → remote OCR → line-item reconstruction.
pub struct BillPipeline<R: RecognitionBackend> {
    recognizer: R,
    reconstructor: LineItemReconstructor,
}

impl<R: RecognitionBackend> BillPipeline<R> {
    pub fn new(recognizer: R, reconstructor: LineItemReconstructor) -> Self {
        Self { recognizer, reconstructor }
    }

    pub async fn process_url(&self, url: &str) -> Result<BillResult, PipelineError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(PipelineError::MissingUrl);
        }

        let recognized = self.recognizer.recognize(url).await?;
        let line_items = self.reconstructor.reconstruct(&recognized);

        tracing::info!(
            regions = recognized.regions.len(),
            items = line_items.len(),
            "Bill reconstructed"
        );
        // The URL may carry pre-signed credentials.
        tracing::debug!("Reconstructed bill source: {url}");

        Ok(BillResult {
            language: recognized.language,
            orientation: recognized.orientation,
            line_items,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
