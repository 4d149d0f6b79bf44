//! Timestamped JSON export of analysis results.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use crate::error::{NotesError, Result};

/// Directory exports land in when none is configured.
pub const DEFAULT_EXPORT_DIR: &str = "whiteboard_exports";

const FILE_PREFIX: &str = "lecture_notes_";

/// Local wall-clock time as `YYYYMMDD_HHMMSS`.
///
/// Only second granularity: two calls within the same second return the same
/// token, and exports made in that second share a file name.
pub fn timestamp() -> String {
    timestamp_at(Local::now())
}

pub fn timestamp_at(at: DateTime<Local>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

/// Writes each result to `<output_dir>/lecture_notes_<timestamp>.json`.
#[derive(Debug, Clone)]
pub struct NotesExporter {
    output_dir: PathBuf,
}

impl NotesExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Serialize `data` as 4-space indented UTF-8 JSON and return the path written.
    pub async fn export<T: Serialize + ?Sized>(&self, data: &T) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| NotesError::io(&self.output_dir, e))?;

        let path = self
            .output_dir
            .join(format!("{FILE_PREFIX}{}.json", timestamp()));
        let json = to_indented_json(data)?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|e| NotesError::io(&path, e))?;
        info!(path = %path.display(), "Exported lecture notes");
        Ok(path)
    }
}

/// Pretty-print `data` as JSON with a 4-space indent.
pub fn to_indented_json<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)
        .map_err(|e| NotesError::Other(anyhow::Error::new(e).context("failed to serialize notes")))?;
    String::from_utf8(buf)
        .map_err(|e| NotesError::Other(anyhow::Error::new(e).context("serialized notes are not UTF-8")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    #[test]
    fn timestamp_has_sortable_shape() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(timestamp_at(at), "20240307_090501");
        assert_eq!(timestamp().len(), 15);
    }

    #[test]
    fn timestamps_a_second_apart_differ() {
        let a = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        let b = a + chrono::Duration::milliseconds(1500);
        assert_ne!(timestamp_at(a), timestamp_at(b));
    }

    #[test]
    fn timestamps_within_a_second_collide() {
        let a = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        let b = a + chrono::Duration::milliseconds(400);
        assert_eq!(timestamp_at(a), timestamp_at(b));
    }

    #[tokio::test]
    async fn export_round_trips_and_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let exporter = NotesExporter::new(tmp.path().join("nested").join("exports"));
        let data = json!({
            "topic": "Übertragungsfunktion",
            "sections": [],
            "flashcards": [{ "question": "Was ist H(s)?", "answer": "Y(s)/X(s)" }],
            "summary": "Laplace ∑"
        });

        let path = exporter.export(&data).await.unwrap();
        assert!(path.exists());
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("lecture_notes_"));
        assert!(name.ends_with(".json"));

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, data);
    }

    #[tokio::test]
    async fn export_uses_four_space_indent_and_keeps_non_ascii() {
        let tmp = tempfile::tempdir().unwrap();
        let exporter = NotesExporter::new(tmp.path());
        let path = exporter.export(&json!({ "topic": "Größe" })).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n    \"topic\": \"Größe\""));
        assert!(!written.contains("\\u"));
    }

    #[tokio::test]
    async fn export_fails_when_dir_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("exports");
        std::fs::write(&blocker, b"not a dir").unwrap();

        let err = NotesExporter::new(&blocker)
            .export(&json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, NotesError::Io { .. }));
    }
}
