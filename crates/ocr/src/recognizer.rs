use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::types::RecognitionResult;

pub const DEFAULT_OCR_ENDPOINT: &str = "https://api.projectoxford.ai/vision/v1.0/ocr";

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Debug, Error)]
pub enum RecognizeError {
    #[error("Recognition request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Recognition service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Recognition response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Recognition service unavailable: {0}")]
    Unavailable(String),
}

/// Abstraction over a remote OCR service.
/// Implementations take the URL of an uploaded bill image and return the
/// region/line/word tree the service recognized in it.
pub trait RecognitionBackend: Send + Sync {
    fn recognize(
        &self,
        image_url: &str,
    ) -> impl Future<Output = Result<RecognitionResult, RecognizeError>> + Send;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a preset recognition tree, or a preset failure.
pub struct MockRecognizer {
    outcome: Result<RecognitionResult, String>,
}

impl MockRecognizer {
    pub fn new(result: RecognitionResult) -> Self {
        Self { outcome: Ok(result) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { outcome: Err(message.into()) }
    }
}

impl RecognitionBackend for MockRecognizer {
    async fn recognize(&self, _image_url: &str) -> Result<RecognitionResult, RecognizeError> {
        self.outcome
            .clone()
            .map_err(RecognizeError::Unavailable)
    }
}

// ── Cognitive Services backend ────────────────────────────────────────────────

#[derive(Serialize)]
struct ImageSource<'a> {
    url: &'a str,
}

/// Client for the Cognitive Services OCR endpoint. The image is fetched by
/// the service itself; only its URL is sent.
pub struct CognitiveServicesRecognizer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl CognitiveServicesRecognizer {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RecognizeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RecognitionBackend for CognitiveServicesRecognizer {
    async fn recognize(&self, image_url: &str) -> Result<RecognitionResult, RecognizeError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("language", "unk"), ("detectOrientation", "true")])
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .json(&ImageSource { url: image_url })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RecognizeError::Status { status: status.as_u16(), body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
