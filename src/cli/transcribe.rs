//! `podclip transcribe`: run the sidecar transcriber without the TUI.

use super::common::{print_error, print_progress, print_success};
use crate::config::Config;
use crate::screens::resolve_video;
use crate::services::{SidecarTranscriber, Transcriber};
use crate::transcript::{format_timestamp, Transcript};
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub fn run(video: &Path, json: bool) -> Result<()> {
    info!("CLI: transcribe {:?}", video);
    let config_path = crate::utils::get_config_path();
    let config = Config::load_or_create(&config_path).context("Failed to load configuration")?;
    let working_dir = std::env::current_dir().context("Failed to read current directory")?;

    let video = resolve_video(&video.to_string_lossy(), &config, &working_dir)?;
    let transcriber = SidecarTranscriber::new(Duration::ZERO);
    let mut report = |status: String| print_progress(&status);
    let result = match transcriber.transcribe(&video, &mut report) {
        Ok(result) => result,
        Err(e) => {
            print_error(&format!("{:#}", e));
            return Err(e);
        }
    };

    if json {
        let output = serde_json::to_string_pretty(result.as_value())
            .context("Failed to serialize transcription")?;
        println!("{}", output);
        return Ok(());
    }

    let transcript = Transcript::from_result(&result)?;
    for segment in &transcript.segments {
        let speaker = segment
            .speaker
            .as_deref()
            .map(|s| format!("{}: ", s))
            .unwrap_or_default();
        println!(
            "[{} - {}] {}{}",
            format_timestamp(segment.start),
            format_timestamp(segment.end),
            speaker,
            segment.text
        );
    }
    print_success(&format!(
        "{} segments, {}",
        transcript.len(),
        format_timestamp(transcript.duration())
    ));
    Ok(())
}
