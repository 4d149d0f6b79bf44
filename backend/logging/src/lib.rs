//! Structured logging for the whiteboard notes service.
//!
//! Console output, optional rolling NDJSON files, and credential redaction.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_sensitive_data;
