use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::debug;

use whiteboard_core::{EncodedImage, NotesError, Result};

use crate::mime_detect::detect_media_type;

/// Standard base64 encoding of `bytes`.
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Read the whole file at `path` and return it base64-encoded.
pub async fn encode_file(path: &Path) -> Result<String> {
    let bytes = read(path).await?;
    Ok(encode_bytes(&bytes))
}

/// Read an image, detect its media type, and encode it for the model.
pub async fn load_image(path: &Path) -> Result<EncodedImage> {
    let bytes = read(path).await?;
    let media_type = detect_media_type(path, &bytes)?;
    debug!(
        path = %path.display(),
        size_bytes = bytes.len(),
        media_type = %media_type,
        "Loaded image"
    );
    Ok(EncodedImage::new(encode_bytes(&bytes), media_type))
}

async fn read(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| NotesError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use whiteboard_core::ImageMediaType;

    #[tokio::test]
    async fn encoded_file_decodes_to_original_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("board.bin");
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4099).collect();
        std::fs::write(&path, &bytes).unwrap();

        let encoded = encode_file(&path).await.unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap(), bytes);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = encode_file(&tmp.path().join("nope.jpg")).await.unwrap_err();
        assert!(matches!(err, NotesError::Io { .. }));
    }

    #[tokio::test]
    async fn load_image_detects_png() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("upload.jpg");
        let bytes = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];
        std::fs::write(&path, bytes).unwrap();

        let image = load_image(&path).await.unwrap();
        assert_eq!(image.media_type, ImageMediaType::Png);
        assert_eq!(STANDARD.decode(&image.data).unwrap(), bytes);
    }
}
