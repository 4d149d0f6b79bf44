use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use whiteboard_core::{AnalysisResult, EncodedImage, Result, WhiteboardAnalyzer};

use crate::reply::parse_analysis;

/// An analyzer that answers every image with the same canned reply text.
///
/// The reply goes through the same fence stripping and validation as a real
/// model reply, so malformed canned text fails the same way.
pub struct MockAnalyzer {
    reply: String,
    calls: AtomicUsize,
}

impl MockAnalyzer {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_result(result: &AnalysisResult) -> Self {
        Self::with_reply(serde_json::to_string(result).unwrap_or_default())
    }

    /// Number of images analyzed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WhiteboardAnalyzer for MockAnalyzer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn analyze(&self, _image: &EncodedImage) -> Result<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        parse_analysis(&self.reply)
    }
}
