//! Upload endpoint (`POST /api/analyze`).

use std::path::Path;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::info;

use whiteboard_core::{AnalysisResult, NotesError};

use crate::server::GatewayState;

/// Multipart field carrying the photo.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: AnalysisResult,
    pub status: String,
    pub export_path: String,
}

/// Handler for `POST /api/analyze`.
///
/// Stores the upload in a temporary file that lives for the duration of the
/// request, then runs the pipeline on that path.
pub async fn analyze_upload(
    State(state): State<GatewayState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let limit = state.max_upload_bytes;
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit, "Failed to parse multipart data"))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, limit, "Failed to read upload"))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) = upload
        .filter(|(_, bytes)| !bytes.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No image uploaded".into()))?;
    info!(
        file_name = file_name.as_deref().unwrap_or("<unnamed>"),
        size_bytes = bytes.len(),
        "Received whiteboard upload"
    );

    let temp = tempfile::Builder::new()
        .prefix("whiteboard-")
        .suffix(&upload_suffix(file_name.as_deref()))
        .tempfile()
        .map_err(|e| NotesError::io(std::env::temp_dir(), e))?;
    tokio::fs::write(temp.path(), &bytes)
        .await
        .map_err(|e| NotesError::io(temp.path(), e))?;

    let processed = state.pipeline.process(temp.path()).await?;
    Ok(Json(AnalyzeResponse {
        export_path: processed.export_path.display().to_string(),
        status: processed.status,
        result: processed.result,
    }))
}

/// A body cut off by `DefaultBodyLimit` surfaces as a multipart error whose
/// status is 413; everything else is the client's malformed request.
fn multipart_error(err: MultipartError, limit: usize, context: &str) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge { limit }
    } else {
        ApiError::BadRequest(format!("{context}: {err}"))
    }
}

/// Keep the uploaded extension so format detection can fall back to it.
fn upload_suffix(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

/// Errors returned by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Image exceeds the upload limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error(transparent)]
    Notes(#[from] NotesError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Notes(err) => match err {
                NotesError::UnsupportedImage { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                NotesError::Http(_) | NotesError::Provider { .. } => StatusCode::BAD_GATEWAY,
                NotesError::EmptyReply
                | NotesError::Truncated { .. }
                | NotesError::MalformedJson(_)
                | NotesError::Schema(_) => StatusCode::UNPROCESSABLE_ENTITY,
                NotesError::Io { .. } | NotesError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::PayloadTooLarge { .. } => "payload_too_large",
            Self::Notes(err) => err.kind(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(kind = self.kind(), "Analysis failed: {message}");
        } else {
            tracing::warn!(kind = self.kind(), "Analysis rejected: {message}");
        }

        let body = json!({
            "error": message,
            "kind": self.kind(),
            "status": format!("Analysis failed: {message}"),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_keeps_plain_extensions() {
        assert_eq!(upload_suffix(Some("IMG_2041.JPG")), ".JPG");
        assert_eq!(upload_suffix(Some("board.png")), ".png");
        assert_eq!(upload_suffix(Some("no_extension")), "");
        assert_eq!(upload_suffix(Some("weird.p/g")), "");
        assert_eq!(upload_suffix(None), "");
    }

    #[test]
    fn errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(NotesError::EmptyReply).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(NotesError::Provider { status: 529, message: "overloaded".into() })
                .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PayloadTooLarge { limit: 1024 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
