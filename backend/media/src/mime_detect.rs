//! Media type detection for uploaded images.
//!
//! The file signature wins over the extension; browsers and phones often
//! upload PNG screenshots or HEIC conversions with a `.jpg` name.

use std::path::Path;

use whiteboard_core::{ImageMediaType, NotesError, Result};

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Identify an image format from its leading bytes.
pub fn sniff_media_type(bytes: &[u8]) -> Option<ImageMediaType> {
    if bytes.starts_with(JPEG_MAGIC) {
        Some(ImageMediaType::Jpeg)
    } else if bytes.starts_with(PNG_MAGIC) {
        Some(ImageMediaType::Png)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(ImageMediaType::Gif)
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some(ImageMediaType::Webp)
    } else {
        None
    }
}

/// Map a file extension to a supported image format.
pub fn media_type_from_extension(path: &Path) -> Option<ImageMediaType> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => Some(ImageMediaType::Jpeg),
        "png"          => Some(ImageMediaType::Png),
        "gif"          => Some(ImageMediaType::Gif),
        "webp"         => Some(ImageMediaType::Webp),
        _              => None,
    }
}

/// Detect the media type of `bytes` read from `path`.
pub fn detect_media_type(path: &Path, bytes: &[u8]) -> Result<ImageMediaType> {
    sniff_media_type(bytes)
        .or_else(|| media_type_from_extension(path))
        .ok_or_else(|| NotesError::UnsupportedImage {
            path: path.to_path_buf(),
        })
}
