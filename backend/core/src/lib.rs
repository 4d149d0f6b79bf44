pub mod error;
pub mod export;
pub mod schema;
pub mod traits;
pub mod types;

pub use error::{NotesError, Result};
pub use export::{timestamp, timestamp_at, to_indented_json, NotesExporter, DEFAULT_EXPORT_DIR};
pub use schema::{validate_analysis, SchemaViolation};
pub use traits::WhiteboardAnalyzer;
pub use types::{AnalysisResult, ContentType, EncodedImage, Flashcard, ImageMediaType, Section};
