//! Session state for the clip generator.
//!
//! The application moves through three screens. All data that crosses a
//! screen boundary lives in the [`ScreenController`], which is the only
//! writer of that data.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐ VideoUploaded  ┌────────────┐ TranscriptionComplete ┌──────────┐
//! │  Upload  │ ─────────────▶ │ Processing │ ────────────────────▶ │  Editor  │
//! └──────────┘                └────────────┘                       └──────────┘
//!       ▲        BackToUpload        │                                   │
//!       └────────────────────────────┴───────────────────────────────────┘
//! ```
//!
//! Screens never mutate the controller directly. They return actions which the
//! app turns into [`ControllerEvent`]s and feeds to
//! [`ScreenController::dispatch`].

pub mod controller;

pub use controller::{ScreenController, SubscriptionId};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Identifier of the screen that is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    /// Pick a video.
    #[default]
    Upload,
    /// Waiting for the transcript.
    Processing,
    /// Browse the transcript and mark clips.
    Editor,
}

impl ScreenId {
    /// Title shown in the header block.
    pub fn title(&self) -> &'static str {
        match self {
            ScreenId::Upload => "podclip - Upload",
            ScreenId::Processing => "podclip - Processing",
            ScreenId::Editor => "podclip - Editor",
        }
    }

    /// One-line description shown next to the title.
    pub fn description(&self) -> &'static str {
        match self {
            ScreenId::Upload => "Choose the podcast video you want to cut clips from.",
            ScreenId::Processing => "Fetching the timed transcript for your video.",
            ScreenId::Editor => "Browse transcript segments and mark the clips to keep.",
        }
    }
}

/// The uploaded video file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    /// Location on disk.
    pub path: PathBuf,
    /// Size reported by the filesystem at upload time.
    pub size_bytes: u64,
}

impl VideoFile {
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
        }
    }

    /// Open a video file, reading its size from the filesystem.
    pub fn open(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to read metadata for {:?}", path))?;
        Ok(Self::new(path, metadata.len()))
    }

    /// File name for display, falling back to the full path.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }

    /// File name without its extension.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "video".to_string())
    }
}

/// The (file, url) pair identifying the uploaded video for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef {
    pub file: VideoFile,
    pub url: String,
}

impl VideoRef {
    pub fn new(file: VideoFile, url: impl Into<String>) -> Self {
        Self {
            file,
            url: url.into(),
        }
    }

    /// Build a reference to a file on disk with a `file://` display URL.
    pub fn from_path(path: &Path) -> Result<Self> {
        let canonical = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {:?}", path))?;
        let file = VideoFile::open(&canonical)?;
        let url = format!("file://{}", canonical.to_string_lossy());
        Ok(Self::new(file, url))
    }
}

/// Transcription data produced by processing.
///
/// The controller treats this as opaque and only stores and forwards it. The
/// editor derives a typed [`crate::transcript::Transcript`] from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranscriptionResult(serde_json::Value);

impl TranscriptionResult {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for TranscriptionResult {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Events that drive the screen state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// The upload screen produced a video.
    VideoUploaded(VideoRef),
    /// The processing screen reported progress.
    StatusUpdated(String),
    /// The processing screen finished.
    TranscriptionComplete(TranscriptionResult),
    /// The user asked for a new upload.
    BackToUpload,
}

impl ControllerEvent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ControllerEvent::VideoUploaded(_) => "video_uploaded",
            ControllerEvent::StatusUpdated(_) => "status_updated",
            ControllerEvent::TranscriptionComplete(_) => "transcription_complete",
            ControllerEvent::BackToUpload => "back_to_upload",
        }
    }
}

/// Outcome of dispatching an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The active screen changed.
    Moved { from: ScreenId, to: ScreenId },
    /// The processing status text changed; the screen did not.
    StatusUpdated,
    /// The event was valid but there was nothing to change.
    Unchanged,
    /// The event is not valid in the current screen and was dropped.
    Ignored {
        event: &'static str,
        screen: ScreenId,
    },
}

impl Transition {
    /// Whether state observable through the view changed.
    pub fn changed(&self) -> bool {
        matches!(self, Transition::Moved { .. } | Transition::StatusUpdated)
    }
}

/// What the current screen is given to render.
///
/// This is a pure projection of the controller state. The editor variant has
/// no access to the processing status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenView<'a> {
    Upload,
    Processing {
        url: &'a str,
        status: &'a str,
    },
    Editor {
        file: &'a VideoFile,
        url: &'a str,
        transcription: &'a TranscriptionResult,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_video_ref_from_path_builds_file_url() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("episode.mp4");
        std::fs::write(&path, b"fake video").unwrap();

        let video = VideoRef::from_path(&path).unwrap();
        assert!(video.url.starts_with("file://"));
        assert!(video.url.ends_with("episode.mp4"));
        assert_eq!(video.file.size_bytes, 10);
        assert_eq!(video.file.name(), "episode.mp4");
        assert_eq!(video.file.stem(), "episode");
    }

    #[test]
    fn test_video_ref_from_missing_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(VideoRef::from_path(&temp_dir.path().join("missing.mp4")).is_err());
    }

    #[test]
    fn test_transition_changed() {
        assert!(Transition::StatusUpdated.changed());
        assert!(Transition::Moved {
            from: ScreenId::Upload,
            to: ScreenId::Processing
        }
        .changed());
        assert!(!Transition::Unchanged.changed());
        assert!(!Transition::Ignored {
            event: "back_to_upload",
            screen: ScreenId::Upload
        }
        .changed());
    }
}
