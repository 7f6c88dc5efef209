pub mod extract;
pub mod geometry;
pub mod pipeline;
pub mod recognizer;
pub mod types;

pub use extract::{reconstruct, LineItemReconstructor, DEFAULT_THRESHOLD};
pub use geometry::{BoundingBox, BoxParseError};
pub use pipeline::{BillPipeline, BillResult, PipelineError};
pub use recognizer::{
    CognitiveServicesRecognizer, MockRecognizer, RecognitionBackend, RecognizeError,
    DEFAULT_OCR_ENDPOINT,
};
pub use types::{Line, LineItem, RecognitionResult, Region, Word};
