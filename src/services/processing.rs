//! Background processing of an uploaded video.
//!
//! A [`Transcriber`] turns a video into a [`TranscriptionResult`], reporting
//! progress strings as it goes. [`ProcessingJob`] runs one on the tokio
//! blocking pool and forwards everything it produces as
//! [`ProcessingMessage`]s, tagged with the session the job belongs to.
//! The receiving side decides whether the session is still current.

use crate::state::{TranscriptionResult, VideoRef};
use crate::transcript::Transcript;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

/// Produces transcription data for a video.
pub trait Transcriber: Send + Sync {
    /// Transcribe `video`, calling `status` with human readable progress.
    fn transcribe(
        &self,
        video: &VideoRef,
        status: &mut dyn FnMut(String),
    ) -> Result<TranscriptionResult>;
}

/// Reads a transcript that already sits next to the video.
///
/// Lookup order for `talk.mp4`: `talk.mp4.json`, `talk.transcript.json`,
/// `talk.mp4.srt`, `talk.srt`.
#[derive(Debug, Clone, Default)]
pub struct SidecarTranscriber {
    step_delay: Duration,
}

impl SidecarTranscriber {
    pub fn new(step_delay: Duration) -> Self {
        Self { step_delay }
    }

    /// Candidate sidecar paths in lookup order
    pub fn candidates(video_path: &Path) -> Vec<PathBuf> {
        let stem = video_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let appended = |suffix: &str| {
            let mut name = video_path.as_os_str().to_os_string();
            name.push(suffix);
            PathBuf::from(name)
        };
        let sibling = |name: String| video_path.with_file_name(name);

        vec![
            appended(".json"),
            sibling(format!("{}.transcript.json", stem)),
            appended(".srt"),
            sibling(format!("{}.srt", stem)),
        ]
    }

    /// First existing sidecar for the video, if any
    pub fn find_sidecar(video_path: &Path) -> Option<PathBuf> {
        Self::candidates(video_path)
            .into_iter()
            .find(|candidate| candidate.is_file())
    }

    /// Load and parse a sidecar file based on its extension
    pub fn load(path: &Path) -> Result<Transcript> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript: {:?}", path))?;
        let is_srt = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("srt"));
        let transcript = if is_srt {
            Transcript::from_srt(&content)
        } else {
            Transcript::from_json(&content)
        };
        transcript.with_context(|| format!("Invalid transcript in {:?}", path))
    }

    fn pause(&self) {
        if !self.step_delay.is_zero() {
            std::thread::sleep(self.step_delay);
        }
    }
}

impl Transcriber for SidecarTranscriber {
    fn transcribe(
        &self,
        video: &VideoRef,
        status: &mut dyn FnMut(String),
    ) -> Result<TranscriptionResult> {
        status(format!("Looking for a transcript of {}...", video.file.name()));
        self.pause();

        let Some(sidecar) = Self::find_sidecar(&video.file.path) else {
            let expected = Self::candidates(&video.file.path)
                .iter()
                .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
                .collect::<Vec<_>>()
                .join(", ");
            bail!(
                "No transcript found for {}. Expected one of: {}",
                video.file.name(),
                expected
            );
        };
        debug!("Using sidecar transcript {:?}", sidecar);

        let sidecar_name = sidecar
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        status(format!("Reading {}...", sidecar_name));
        self.pause();

        let transcript = Self::load(&sidecar)?;
        status(format!("Parsed {} segments", transcript.len()));
        self.pause();

        transcript.into_result()
    }
}

/// Progress reported by a running job.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingMessage {
    Status { session: u64, text: String },
    Complete { session: u64, result: TranscriptionResult },
    Failed { session: u64, error: String },
}

impl ProcessingMessage {
    /// The upload session the message belongs to
    pub fn session(&self) -> u64 {
        match self {
            ProcessingMessage::Status { session, .. }
            | ProcessingMessage::Complete { session, .. }
            | ProcessingMessage::Failed { session, .. } => *session,
        }
    }
}

/// Starts transcription work off the UI thread.
pub struct ProcessingJob;

impl ProcessingJob {
    /// Run `transcriber` for `video` on the blocking pool of `runtime`.
    ///
    /// Every status string and the final outcome are sent on `sender`. Send
    /// errors are ignored: a closed channel means nobody is listening anymore.
    pub fn start(
        runtime: &Handle,
        transcriber: Arc<dyn Transcriber>,
        video: VideoRef,
        session: u64,
        sender: UnboundedSender<ProcessingMessage>,
    ) {
        info!("Starting processing for {} (session {})", video.url, session);
        runtime.spawn_blocking(move || {
            let status_sender = sender.clone();
            let mut report = move |text: String| {
                let _ = status_sender.send(ProcessingMessage::Status { session, text });
            };

            let message = match transcriber.transcribe(&video, &mut report) {
                Ok(result) => {
                    info!("Processing finished for session {}", session);
                    ProcessingMessage::Complete { session, result }
                }
                Err(e) => {
                    error!("Processing failed for session {}: {:#}", session, e);
                    ProcessingMessage::Failed {
                        session,
                        error: format!("{:#}", e),
                    }
                }
            };
            let _ = sender.send(message);
        });
    }
}
