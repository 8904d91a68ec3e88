//! podclip - turn podcast videos into transcript-based clips from the terminal
//!
//! The application walks through three screens: Upload, Processing and
//! Editor. [`state::ScreenController`] owns which one is active and the data
//! handed between them; everything else is screens, services and terminal
//! plumbing around it.

// Core modules
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod keymap;
pub mod screens;
pub mod services;
pub mod state;
pub mod styles;
pub mod transcript;
pub mod tui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use config::Config;
pub use state::{
    ControllerEvent, ScreenController, ScreenId, ScreenView, Transition, TranscriptionResult,
    VideoFile, VideoRef,
};
pub use transcript::{Segment, Transcript};

// Keymap re-exports (used by Config and for external API)
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};
