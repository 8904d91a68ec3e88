//! Processing screen.
//!
//! Starts a [`ProcessingJob`] for the current session when entered and turns
//! the job's messages into screen actions on every tick. Leaving the screen
//! drops the job's receiver, which is what discards a stale job's output.
//! Each job gets its own channel, so the session check in `tick` is only a
//! second guard and never fires in the running app.

use crate::components::MessageBox;
use crate::keymap::Action;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{ProcessingJob, ProcessingMessage, Transcriber};
use crate::state::ScreenView;
use crate::styles::theme;
use crate::widgets::ToastVariant;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};
use ratatui::Frame;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};
use tracing::{debug, warn};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct ProcessingScreen {
    runtime: Handle,
    transcriber: Arc<dyn Transcriber>,
    receiver: Option<UnboundedReceiver<ProcessingMessage>>,
    error: Option<String>,
    spinner_frame: usize,
}

impl ProcessingScreen {
    pub fn new(runtime: Handle, transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            runtime,
            transcriber,
            receiver: None,
            error: None,
            spinner_frame: 0,
        }
    }

    /// Whether a job is running for the current session
    pub fn is_running(&self) -> bool {
        self.receiver.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn handle_message(&mut self, message: ProcessingMessage, actions: &mut Vec<ScreenAction>) {
        match message {
            ProcessingMessage::Status { text, .. } => {
                actions.push(ScreenAction::StatusUpdate(text));
            }
            ProcessingMessage::Complete { result, .. } => {
                self.receiver = None;
                actions.push(ScreenAction::TranscriptionComplete(result));
            }
            ProcessingMessage::Failed { error, .. } => self.fail(error, actions),
        }
    }

    fn fail(&mut self, error: String, actions: &mut Vec<ScreenAction>) {
        self.receiver = None;
        actions.push(ScreenAction::StatusUpdate("Processing failed".to_string()));
        actions.push(ScreenAction::toast("Processing failed", ToastVariant::Error));
        self.error = Some(error);
    }
}

impl Screen for ProcessingScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let ScreenView::Processing { url, status } = ctx.controller.view() else {
            return Ok(());
        };
        let t = theme();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        let status_line = if let Some(error) = &self.error {
            Line::from(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(t.error),
            ))
        } else {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            let text = if status.is_empty() { "Starting..." } else { status };
            Line::from(vec![
                Span::styled(format!("{} ", spinner), Style::default().fg(t.primary)),
                Span::styled(text, t.text_style()),
            ])
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(" Processing ")
            .padding(Padding::horizontal(1));
        let body = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Video: ", t.muted_style()),
                Span::styled(
                    url,
                    Style::default()
                        .fg(t.text_emphasis)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            status_line,
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(body, chunks[0]);

        if self.error.is_some() {
            let hint = format!(
                "The transcript could not be produced. Press {} to start a new upload.",
                ctx.config.keymap.key_for(Action::NewUpload)
            );
            let hint_area = Rect {
                height: chunks[1].height.min(6),
                ..chunks[1]
            };
            MessageBox::render_error(frame, hint_area, &hint)?;
        }

        Ok(())
    }

    fn handle_event(&mut self, _event: Event, _ctx: &ScreenContext) -> Result<ScreenAction> {
        // Only global keys apply while processing
        Ok(ScreenAction::None)
    }

    fn footer_text(&self, ctx: &RenderContext) -> String {
        let k = &ctx.config.keymap;
        format!(
            "{}: New Upload | {}: Help | {}: Quit",
            k.key_for(Action::NewUpload),
            k.key_for(Action::Help),
            k.key_for(Action::Quit),
        )
    }

    fn tick(&mut self, ctx: &ScreenContext) -> Result<Vec<ScreenAction>> {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        let mut actions = Vec::new();
        let current_session = ctx.controller.session();

        while let Some(receiver) = self.receiver.as_mut() {
            let message = match receiver.try_recv() {
                Ok(message) => message,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Processing worker stopped without a result");
                    self.fail("Processing stopped unexpectedly".to_string(), &mut actions);
                    break;
                }
            };
            if message.session() != current_session {
                debug!(
                    "Dropping message for session {} (current {})",
                    message.session(),
                    current_session
                );
                continue;
            }
            self.handle_message(message, &mut actions);
        }

        Ok(actions)
    }

    fn on_enter(&mut self, ctx: &ScreenContext) -> Result<()> {
        self.error = None;
        self.spinner_frame = 0;
        let Some(video) = ctx.controller.video() else {
            return Ok(());
        };

        let (sender, receiver) = mpsc::unbounded_channel();
        ProcessingJob::start(
            &self.runtime,
            Arc::clone(&self.transcriber),
            video.clone(),
            ctx.controller.session(),
            sender,
        );
        self.receiver = Some(receiver);
        Ok(())
    }

    fn on_exit(&mut self, _ctx: &ScreenContext) -> Result<()> {
        // The worker keeps running; dropping the receiver discards its output
        self.receiver = None;
        self.error = None;
        Ok(())
    }
}
