//! Writing clip definitions to disk.
//!
//! Clips are only time ranges plus the transcript text they cover; nothing
//! here touches the video itself.

use crate::state::VideoRef;
use crate::transcript::Segment;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// A marked range of the video. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Clip {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Result<Self> {
        if !(start.is_finite() && end.is_finite()) || start < 0.0 {
            bail!("Clip has an invalid start time");
        }
        if end <= start {
            bail!("Clip must end after it starts ({:.3}s..{:.3}s)", start, end);
        }
        Ok(Self {
            start,
            end,
            text: text.into(),
        })
    }

    /// Clip spanning a run of consecutive segments
    pub fn from_segments(segments: &[Segment]) -> Result<Self> {
        let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
            bail!("A clip needs at least one segment");
        };
        let text = segments
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(first.start, last.end, text)
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// On-disk shape of an exported clip list
#[derive(Debug, Serialize, Deserialize)]
pub struct ClipExport {
    pub video: String,
    pub url: String,
    pub created_at: DateTime<Local>,
    pub clips: Vec<Clip>,
}

/// Writes clip lists as pretty JSON into a directory
#[derive(Debug, Clone)]
pub struct ClipExporter {
    export_dir: PathBuf,
}

impl ClipExporter {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    /// Export clips for a video, returning the written path
    pub fn export(&self, video: &VideoRef, clips: &[Clip]) -> Result<PathBuf> {
        self.export_at(video, clips, Local::now())
    }

    /// Export with an explicit timestamp
    pub fn export_at(
        &self,
        video: &VideoRef,
        clips: &[Clip],
        created_at: DateTime<Local>,
    ) -> Result<PathBuf> {
        if clips.is_empty() {
            bail!("No clips to save. Mark a range and add a clip first.");
        }

        std::fs::create_dir_all(&self.export_dir).with_context(|| {
            format!("Failed to create export directory: {:?}", self.export_dir)
        })?;

        let file_name = format!(
            "{}-clips-{}.json",
            video.file.stem(),
            created_at.format("%Y%m%d-%H%M%S")
        );
        let path = self.export_dir.join(file_name);

        let export = ClipExport {
            video: video.file.name(),
            url: video.url.clone(),
            created_at,
            clips: clips.to_vec(),
        };
        let content =
            serde_json::to_string_pretty(&export).context("Failed to serialize clip list")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write clip list: {:?}", path))?;

        info!("Exported {} clips to {:?}", clips.len(), path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::VideoFile;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn segment(start: f64, end: f64, text: &str) -> Segment {
        Segment {
            start,
            end,
            text: text.to_string(),
            speaker: None,
        }
    }

    #[test]
    fn test_clip_requires_positive_range() {
        assert!(Clip::new(2.0, 2.0, "x").is_err());
        assert!(Clip::new(3.0, 2.0, "x").is_err());
        assert!(Clip::new(-1.0, 2.0, "x").is_err());
        assert_eq!(Clip::new(1.0, 2.5, "x").unwrap().duration(), 1.5);
    }

    #[test]
    fn test_clip_from_segments_joins_text() {
        let clip = Clip::from_segments(&[
            segment(1.0, 2.0, "Hello"),
            segment(2.0, 3.0, "  "),
            segment(3.0, 4.5, "world"),
        ])
        .unwrap();
        assert_eq!(clip.start, 1.0);
        assert_eq!(clip.end, 4.5);
        assert_eq!(clip.text, "Hello world");
        assert!(Clip::from_segments(&[]).is_err());
    }

    #[test]
    fn test_export_writes_json() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = ClipExporter::new(temp_dir.path().join("out"));
        let video = VideoRef::new(VideoFile::new("/videos/episode-12.mp4", 10), "blob:1");
        let created_at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        let clips = vec![Clip::new(0.0, 4.0, "intro").unwrap()];

        let path = exporter.export_at(&video, &clips, created_at).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "episode-12-clips-20240309-140500.json"
        );

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: ClipExport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.video, "episode-12.mp4");
        assert_eq!(parsed.url, "blob:1");
        assert_eq!(parsed.clips, clips);
    }

    #[test]
    fn test_export_refuses_empty_list() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = ClipExporter::new(temp_dir.path());
        let video = VideoRef::new(VideoFile::new("a.mp4", 1), "blob:1");
        let err = exporter.export(&video, &[]).unwrap_err();
        assert!(err.to_string().contains("No clips"));
    }
}
