use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AnalysisResult, EncodedImage};

/// A service that turns a whiteboard photo into structured notes.
///
/// Built once at startup and shared by every request, so implementations
/// should hold their connection and credentials for reuse.
#[async_trait]
pub trait WhiteboardAnalyzer: Send + Sync {
    /// Provider name (e.g., "anthropic", "mock").
    fn name(&self) -> &str;

    /// Analyze one encoded image and return validated notes.
    async fn analyze(&self, image: &EncodedImage) -> Result<AnalysisResult>;
}
