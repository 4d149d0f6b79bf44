//! Reading uploaded whiteboard photos and preparing them for a vision model.

pub mod encode;
pub mod mime_detect;

pub use encode::{encode_bytes, encode_file, load_image};
pub use mime_detect::{detect_media_type, media_type_from_extension, sniff_media_type};
