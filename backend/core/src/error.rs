use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaViolation;

/// Top-level error type for the whiteboard notes pipeline.
#[derive(Debug, Error)]
pub enum NotesError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported image format: {}", .path.display())]
    UnsupportedImage { path: PathBuf },

    #[error("HTTP request to model provider failed: {0}")]
    Http(String),

    #[error("model provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("model reply contained no text block")]
    EmptyReply,

    #[error("model reply was cut off at the {max_tokens}-token output budget")]
    Truncated { max_tokens: u32 },

    #[error("model reply is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] SchemaViolation),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NotesError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::UnsupportedImage { .. } => "unsupported_image",
            Self::Http(_) => "http",
            Self::Provider { .. } => "provider",
            Self::EmptyReply => "empty_reply",
            Self::Truncated { .. } => "truncated",
            Self::MalformedJson(_) => "malformed_json",
            Self::Schema(_) => "schema",
            Self::Other(_) => "other",
        }
    }
}

pub type Result<T, E = NotesError> = std::result::Result<T, E>;
