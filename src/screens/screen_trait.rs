//! Screen trait and associated types.
//!
//! Screens own their local UI state (input buffers, list selection, marked
//! clips) while the [`ScreenController`] owns the data handed from one screen
//! to the next. Screens read that data through the context and report what
//! happened by returning a [`ScreenAction`]; they never mutate the controller.

use crate::config::Config;
use crate::state::{ScreenController, TranscriptionResult, VideoRef};
use crate::widgets::ToastVariant;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;
use std::path::Path;

/// Context provided for rendering screens.
pub struct RenderContext<'a> {
    /// Application configuration.
    pub config: &'a Config,
    /// Read-only access to the controller state.
    pub controller: &'a ScreenController,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config, controller: &'a ScreenController) -> Self {
        Self { config, controller }
    }
}

/// Context provided for handling events.
pub struct ScreenContext<'a> {
    /// Application configuration.
    pub config: &'a Config,
    /// Read-only access to the controller state.
    pub controller: &'a ScreenController,
    /// Directory relative paths are resolved against.
    pub working_dir: &'a Path,
}

impl<'a> ScreenContext<'a> {
    pub fn new(
        config: &'a Config,
        controller: &'a ScreenController,
        working_dir: &'a Path,
    ) -> Self {
        Self {
            config,
            controller,
            working_dir,
        }
    }
}

/// Actions that a screen can return after handling an event or a tick.
///
/// The controller-bound variants are turned into controller events by the
/// app; the rest are UI requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScreenAction {
    /// Nothing to do.
    #[default]
    None,
    /// The upload screen accepted a video.
    VideoUploaded(VideoRef),
    /// The processing screen reported progress.
    StatusUpdate(String),
    /// The processing screen has a result.
    TranscriptionComplete(TranscriptionResult),
    /// Discard the session and go back to upload.
    NewUpload,
    /// Show a toast notification.
    ShowToast {
        message: String,
        variant: ToastVariant,
    },
}

impl ScreenAction {
    pub fn toast(message: impl Into<String>, variant: ToastVariant) -> Self {
        Self::ShowToast {
            message: message.into(),
            variant,
        }
    }
}

/// Trait for screen controllers.
///
/// # Example
///
/// ```rust,ignore
/// struct MyScreen {
///     selected: usize,
/// }
///
/// impl Screen for MyScreen {
///     fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
///         // Draw widgets
///         Ok(())
///     }
///
///     fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
///         Ok(ScreenAction::None)
///     }
/// }
/// ```
pub trait Screen {
    /// Render the screen into the content area between header and footer.
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    /// Handle an input event.
    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Footer hint line, `"key: label | key: label"`.
    fn footer_text(&self, ctx: &RenderContext) -> String;

    /// Check if a text input is currently focused.
    ///
    /// When true, plain character keys go to the input instead of the keymap.
    fn is_input_focused(&self) -> bool {
        false
    }

    /// Called on every loop iteration; returns actions produced by background work.
    fn tick(&mut self, _ctx: &ScreenContext) -> Result<Vec<ScreenAction>> {
        Ok(Vec::new())
    }

    /// Called when the screen becomes the active one.
    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<()> {
        Ok(())
    }

    /// Called when the screen stops being the active one.
    fn on_exit(&mut self, _ctx: &ScreenContext) -> Result<()> {
        Ok(())
    }
}
