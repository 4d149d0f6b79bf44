//! Whiteboard notes HTTP surface.
//!
//! Serves the upload form, the analysis endpoint, and the pipeline that ties
//! encoding, model analysis, and export together.

pub mod analyze;
pub mod control_ui;
pub mod pipeline;
pub mod server;

pub use pipeline::{NotesPipeline, ProcessedNotes};
pub use server::{build_router, start_server, GatewayState};
