//! Shared test utilities for the workflow integration tests.
//!
//! Provides `TestEnv` - an isolated directory with a video folder, an export
//! folder and a config, plus helpers to drive an [`App`] with key events.

use podclip::app::App;
use podclip::config::Config;
use podclip::services::{SidecarTranscriber, Transcriber};
use podclip::ScreenId;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// A complete isolated test environment.
///
/// - `videos/` - where test videos and their sidecar transcripts live
/// - `clips/` - export directory
/// - `config/config.toml` - config path (only written when a test saves it)
///
/// Automatically cleaned up when dropped.
#[allow(dead_code)]
pub struct TestEnv {
    temp_dir: TempDir,
    pub video_dir: PathBuf,
    pub export_dir: PathBuf,
    pub config_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let video_dir = temp_dir.path().join("videos");
        let export_dir = temp_dir.path().join("clips");
        fs::create_dir_all(&video_dir).expect("Failed to create video dir");
        let config_path = temp_dir.path().join("config").join("config.toml");

        Self {
            temp_dir,
            video_dir,
            export_dir,
            config_path,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            export_dir: self.export_dir.clone(),
            processing_step_delay_ms: 0,
            ..Config::default()
        }
    }

    /// Write a fake video file and return its path
    pub fn write_video(&self, name: &str) -> PathBuf {
        let path = self.video_dir.join(name);
        fs::write(&path, b"\x00\x00\x00\x18ftypmp42").expect("Failed to write video");
        path
    }

    /// Write `<stem>.transcript.json` next to the video
    pub fn write_transcript(&self, video_name: &str, json: &str) -> PathBuf {
        let stem = video_name.rsplit_once('.').map_or(video_name, |(s, _)| s);
        let path = self.video_dir.join(format!("{}.transcript.json", stem));
        fs::write(&path, json).expect("Failed to write transcript");
        path
    }

    /// App using the sidecar transcriber without step delays
    pub fn app(&self) -> App {
        self.app_with(Arc::new(SidecarTranscriber::default()))
    }

    pub fn app_with(&self, transcriber: Arc<dyn Transcriber>) -> App {
        App::with_config(
            self.config(),
            self.config_path.clone(),
            self.video_dir.clone(),
            transcriber,
        )
        .expect("Failed to build app")
    }

    pub fn exported_files(&self) -> Vec<PathBuf> {
        match fs::read_dir(&self.export_dir) {
            Ok(entries) => entries.filter_map(|e| e.ok().map(|e| e.path())).collect(),
            Err(_) => Vec::new(),
        }
    }
}

#[allow(dead_code)]
pub const THREE_SEGMENTS: &str = r#"{
  "segments": [
    { "start": 0.0, "end": 3.2, "text": "Welcome to the show.", "speaker": "Host" },
    { "start": 3.2, "end": 7.9, "text": "Today we talk about Rust.", "speaker": "Host" },
    { "start": 7.9, "end": 12.4, "text": "Thanks for having me.", "speaker": "Guest" }
  ]
}"#;

#[allow(dead_code)]
pub fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[allow(dead_code)]
pub fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

#[allow(dead_code)]
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_event(key(KeyCode::Char(c)));
    }
}

/// Tick the app until `done` holds or a few seconds pass.
#[allow(dead_code)]
pub fn tick_until(app: &mut App, done: impl Fn(&App) -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        app.tick();
        if done(app) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    false
}

#[allow(dead_code)]
pub fn wait_for_screen(app: &mut App, screen: ScreenId) -> bool {
    tick_until(app, |app| app.controller().screen() == screen)
}
