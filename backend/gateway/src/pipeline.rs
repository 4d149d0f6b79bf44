//! Encode → analyze → export, one whiteboard at a time.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, instrument};

use whiteboard_core::{AnalysisResult, NotesExporter, Result, WhiteboardAnalyzer};
use whiteboard_media::load_image;

/// Outcome of one successful analysis.
#[derive(Debug, Clone)]
pub struct ProcessedNotes {
    pub result: AnalysisResult,
    pub export_path: PathBuf,
    /// Human-readable line for the status display.
    pub status: String,
}

/// Runs the analysis chain for uploaded images.
///
/// Analyses are serialized: a second request waits until the first has
/// exported its file.
pub struct NotesPipeline {
    analyzer: Arc<dyn WhiteboardAnalyzer>,
    exporter: NotesExporter,
    gate: Mutex<()>,
}

impl NotesPipeline {
    pub fn new(analyzer: Arc<dyn WhiteboardAnalyzer>, exporter: NotesExporter) -> Self {
        Self {
            analyzer,
            exporter,
            gate: Mutex::new(()),
        }
    }

    /// Analyze the image at `image_path` and export the notes.
    ///
    /// Nothing is written unless analysis succeeds.
    #[instrument(skip(self), fields(analyzer = self.analyzer.name()))]
    pub async fn process(&self, image_path: &Path) -> Result<ProcessedNotes> {
        let _guard = self.gate.lock().await;

        let image = load_image(image_path).await?;
        let result = self.analyzer.analyze(&image).await?;
        drop(image);

        let export_path = self.exporter.export(&result).await?;
        info!(
            topic = %result.topic,
            sections = result.sections.len(),
            flashcards = result.flashcards.len(),
            "Whiteboard analyzed"
        );

        Ok(ProcessedNotes {
            status: format!("Saved to: {}", export_path.display()),
            result,
            export_path,
        })
    }
}
