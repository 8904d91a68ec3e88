//! Typed view over transcription data.
//!
//! Processing hands the controller an opaque JSON value. Only the editor and
//! the sidecar loader care about its shape:
//!
//! ```json
//! { "segments": [ { "start": 0.0, "end": 2.5, "text": "Welcome back", "speaker": "A" } ] }
//! ```

use crate::state::TranscriptionResult;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// One timed piece of the transcript. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Transcript {
    /// Interpret a transcription result.
    ///
    /// Segments with a negative start or an end before their start are
    /// rejected so the editor can rely on ordered ranges.
    pub fn from_result(result: &TranscriptionResult) -> Result<Self> {
        let transcript: Transcript = serde_json::from_value(result.as_value().clone())
            .context("Transcription data does not contain a valid segment list")?;
        transcript.validate()?;
        Ok(transcript)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let transcript: Transcript =
            serde_json::from_str(content).context("Failed to parse transcript JSON")?;
        transcript.validate()?;
        Ok(transcript)
    }

    /// Parse SubRip (`.srt`) subtitles.
    ///
    /// Cues are separated by lines that are empty or hold only whitespace.
    pub fn from_srt(content: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut block: Vec<&str> = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                if !block.is_empty() {
                    segments.push(parse_srt_block(&block)?);
                    block.clear();
                }
            } else {
                block.push(line);
            }
        }
        if !block.is_empty() {
            segments.push(parse_srt_block(&block)?);
        }

        let transcript = Transcript { segments };
        transcript.validate()?;
        Ok(transcript)
    }

    pub fn into_result(self) -> Result<TranscriptionResult> {
        let value = serde_json::to_value(self).context("Failed to serialize transcript")?;
        Ok(TranscriptionResult::new(value))
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// End time of the last segment.
    pub fn duration(&self) -> f64 {
        self.segments.iter().map(|s| s.end).fold(0.0, f64::max)
    }

    fn validate(&self) -> Result<()> {
        for (i, segment) in self.segments.iter().enumerate() {
            if !segment.start.is_finite() || !segment.end.is_finite() || segment.start < 0.0 {
                bail!("Segment {} has an invalid start time", i + 1);
            }
            if segment.end < segment.start {
                bail!(
                    "Segment {} ends ({:.3}s) before it starts ({:.3}s)",
                    i + 1,
                    segment.end,
                    segment.start
                );
            }
        }
        Ok(())
    }
}

/// One cue: an optional counter, the timing line, then text lines.
fn parse_srt_block(lines: &[&str]) -> Result<Segment> {
    let mut lines = lines.iter().copied();
    let Some(first) = lines.next() else {
        bail!("Empty subtitle block");
    };
    // The numeric counter line is optional in the wild.
    let timing = if first.contains("-->") {
        first
    } else {
        match lines.next() {
            Some(line) => line,
            None => bail!("Subtitle block '{}' has no timing line", first),
        }
    };
    let Some((start, end)) = timing.split_once("-->") else {
        bail!("Invalid subtitle timing line: {}", timing);
    };
    Ok(Segment {
        start: parse_srt_time(start)?,
        end: parse_srt_time(end)?,
        text: lines.collect::<Vec<_>>().join(" "),
        speaker: None,
    })
}

/// Parse `HH:MM:SS,mmm` (a `.` separator is accepted too).
fn parse_srt_time(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    // Some files append positioning hints after the timestamp
    let raw = raw.split_whitespace().next().unwrap_or(raw);
    let (clock, millis) = raw
        .split_once([',', '.'])
        .unwrap_or((raw, "0"));

    let parts: Vec<&str> = clock.split(':').collect();
    let &[h, m, s] = parts.as_slice() else {
        bail!("Invalid subtitle timestamp: {}", raw);
    };
    let parse = |part: &str| -> Result<f64> {
        part.parse::<u32>()
            .map(f64::from)
            .with_context(|| format!("Invalid subtitle timestamp: {}", raw))
    };
    Ok(parse(h)? * 3600.0 + parse(m)? * 60.0 + parse(s)? + parse(millis)? / 1000.0)
}

/// Format seconds as `mm:ss.mmm`, or `h:mm:ss.mmm` past the hour.
pub fn format_timestamp(seconds: f64) -> String {
    let total_millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let millis = total_millis % 1000;
    let total_secs = total_millis / 1000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;

    if hours > 0 {
        format!("{}:{:02}:{:02}.{:03}", hours, mins, secs, millis)
    } else {
        format!("{:02}:{:02}.{:03}", mins, secs, millis)
    }
}
