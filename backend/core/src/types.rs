use std::fmt;

use serde::{Deserialize, Serialize};

/// Structured lecture notes extracted from one whiteboard photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub topic: String,
    pub sections: Vec<Section>,
    pub flashcards: Vec<Flashcard>,
    pub summary: String,
}

/// One logical block of the whiteboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content_type: ContentType,
    pub content: String,
    pub key_points: Vec<String>,
}

/// What kind of material a section holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
    Formula,
    Diagram,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [Self::Text, Self::Formula, Self::Diagram];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Formula => "formula",
            Self::Diagram => "diagram",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A question/answer study card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// Image formats the model provider accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMediaType {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/gif")]
    Gif,
    #[serde(rename = "image/webp")]
    Webp,
}

impl ImageMediaType {
    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

impl fmt::Display for ImageMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

/// Base64 image data together with its detected media type.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data: String,
    pub media_type: ImageMediaType,
}

impl EncodedImage {
    pub fn new(data: impl Into<String>, media_type: ImageMediaType) -> Self {
        Self {
            data: data.into(),
            media_type,
        }
    }
}

// The payload can be megabytes of base64; keep it out of logs.
impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("media_type", &self.media_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_serializes_lowercase() {
        let json = serde_json::to_string(&ContentType::Formula).unwrap();
        assert_eq!(json, "\"formula\"");
        assert_eq!(ContentType::parse("diagram"), Some(ContentType::Diagram));
        assert_eq!(ContentType::parse("Diagram"), None);
    }

    #[test]
    fn media_type_serializes_as_mime() {
        let json = serde_json::to_string(&ImageMediaType::Png).unwrap();
        assert_eq!(json, "\"image/png\"");
    }

    #[test]
    fn encoded_image_debug_hides_payload() {
        let image = EncodedImage::new("QUJDRA==", ImageMediaType::Jpeg);
        let debug = format!("{image:?}");
        assert!(!debug.contains("QUJDRA=="));
        assert!(debug.contains("data_len: 8"));
    }
}
