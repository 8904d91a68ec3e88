//! Application services layer.
//!
//! Work that happens outside the screen controller: obtaining a transcript
//! for an uploaded video and writing clip lists to disk. Screens and the app
//! call into these; the controller never does.

pub mod clip_export;
pub mod processing;

pub use clip_export::{Clip, ClipExporter};
pub use processing::{ProcessingJob, ProcessingMessage, SidecarTranscriber, Transcriber};
