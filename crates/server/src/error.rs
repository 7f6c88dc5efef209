use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use billscan_ocr::PipelineError;

/// Message returned for any body the JSON extractor refuses. Kept verbatim
/// from the service's original public behavior.
pub const PAYLOAD_ERROR: &str = "Set the Content-Type header, dude.";

#[derive(Debug)]
pub enum ApiError {
    BadPayload,
    MissingUrl,
    Upstream,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadPayload | ApiError::MissingUrl => StatusCode::BAD_REQUEST,
            ApiError::Upstream => StatusCode::BAD_GATEWAY,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::BadPayload => PAYLOAD_ERROR,
            ApiError::MissingUrl => "Missing URL",
            ApiError::Upstream => "Recognition service failed",
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::MissingUrl => ApiError::MissingUrl,
            PipelineError::Recognize(err) => {
                tracing::warn!("Bill recognition failed: {err}");
                ApiError::Upstream
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billscan_ocr::RecognizeError;

    #[test]
    fn pipeline_errors_map_to_status_codes() {
        let e: ApiError = PipelineError::MissingUrl.into();
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);

        let e: ApiError =
            PipelineError::Recognize(RecognizeError::Unavailable("down".into())).into();
        assert_eq!(e.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn bad_payload_keeps_original_message() {
        let resp = ApiError::BadPayload.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::BadPayload.message(), PAYLOAD_ERROR);
    }
}
