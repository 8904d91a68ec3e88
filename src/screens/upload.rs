//! Upload screen.
//!
//! A single path prompt. Submitting a valid video emits
//! [`ScreenAction::VideoUploaded`]; anything else is reported inline.

use crate::components::MessageBox;
use crate::config::Config;
use crate::keymap::Action;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::state::VideoRef;
use crate::styles::theme;
use crate::utils::{expand_path, TextInput};
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::{bail, Result};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;
use std::path::Path;
use tracing::{debug, info};

/// Resolve and validate user input into a video reference.
///
/// `~` is expanded and relative paths are resolved against `working_dir`.
/// The target must be an existing regular file with an allowed extension.
pub fn resolve_video(input: &str, config: &Config, working_dir: &Path) -> Result<VideoRef> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Enter the path of a video file");
    }

    let path = expand_path(input, working_dir);
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }
    if !path.is_file() {
        bail!("Not a file: {}", path.display());
    }
    if !config.is_allowed_extension(&path) {
        bail!(
            "Unsupported file type. Allowed: {}",
            config.allowed_extensions.join(", ")
        );
    }

    VideoRef::from_path(&path)
}

pub struct UploadScreen {
    input: TextInput,
    error: Option<String>,
}

impl Default for UploadScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadScreen {
    pub fn new() -> Self {
        Self {
            input: TextInput::new(),
            error: None,
        }
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn submit(&mut self, ctx: &ScreenContext) -> ScreenAction {
        match resolve_video(self.input.text(), ctx.config, ctx.working_dir) {
            Ok(video) => {
                info!("Accepted upload {:?}", video.file.path);
                self.error = None;
                ScreenAction::VideoUploaded(video)
            }
            Err(e) => {
                debug!("Rejected upload: {}", e);
                self.error = Some(e.to_string());
                ScreenAction::None
            }
        }
    }
}

impl Screen for UploadScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Instructions
                Constraint::Length(3), // Input
                Constraint::Min(0),    // Error / preview
            ])
            .split(area);

        let extensions = ctx.config.allowed_extensions.join(", ");
        let instructions = Paragraph::new(vec![
            Line::from(Span::styled(
                "Type the path of a podcast video and press Enter.",
                t.text_style(),
            )),
            Line::from(Span::styled(
                format!("Supported: {}", extensions),
                t.muted_style(),
            )),
        ])
        .wrap(Wrap { trim: true });
        frame.render_widget(instructions, chunks[0]);

        let widget = TextInputWidget::new(&self.input)
            .title("Video file")
            .placeholder("~/podcasts/episode.mp4")
            .focused(true)
            .error(self.error.is_some());
        frame.render_text_input_widget(widget, chunks[1]);

        if let Some(error) = &self.error {
            let error_area = Rect {
                height: chunks[2].height.min(6),
                ..chunks[2]
            };
            MessageBox::render_error(frame, error_area, error)?;
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        // Plain characters are always text
        if let KeyCode::Char(c) = key.code {
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                self.input.insert_char(c);
                self.error = None;
                return Ok(ScreenAction::None);
            }
        }

        match ctx.config.keymap.get_action(key.code, key.modifiers) {
            Some(Action::Confirm) => Ok(self.submit(ctx)),
            Some(Action::Cancel) => {
                self.input.clear();
                self.error = None;
                Ok(ScreenAction::None)
            }
            Some(action) if self.input.handle_action(action) => {
                self.error = None;
                Ok(ScreenAction::None)
            }
            // Chords never type their letter
            _ if matches!(key.code, KeyCode::Char(_)) => Ok(ScreenAction::None),
            _ => {
                self.input.handle_key(key.code);
                Ok(ScreenAction::None)
            }
        }
    }

    fn footer_text(&self, ctx: &RenderContext) -> String {
        let k = &ctx.config.keymap;
        format!(
            "{}: Submit | {}: Clear | {}: Help | {}: Quit",
            k.key_for(Action::Confirm),
            k.key_for(Action::Cancel),
            k.key_for(Action::Help),
            k.key_for(Action::Quit),
        )
    }

    fn is_input_focused(&self) -> bool {
        true
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<()> {
        self.input.clear();
        self.error = None;
        Ok(())
    }
}
