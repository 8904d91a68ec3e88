use crate::styles::theme;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

/// Message box component for displaying status/error/info messages
pub struct MessageBox;

impl MessageBox {
    /// Render a message box with a title and border color
    ///
    /// # Arguments
    /// * `frame` - The frame to render to
    /// * `area` - The area to render the message box in
    /// * `message` - The message text to display
    /// * `title` - Optional title (defaults to "Message")
    /// * `color` - Optional color for the border (defaults to primary)
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        message: &str,
        title: Option<&str>,
        color: Option<Color>,
    ) -> Result<()> {
        let t = theme();
        let message_block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title.unwrap_or("Message")))
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(color.unwrap_or(t.primary)))
            .padding(Padding::new(2, 2, 1, 1));

        let message_para = Paragraph::new(message)
            .style(t.text_style())
            .wrap(Wrap { trim: true })
            .block(message_block);

        frame.render_widget(message_para, area);

        Ok(())
    }

    /// Render an error message box
    pub fn render_error(frame: &mut Frame, area: Rect, message: &str) -> Result<()> {
        let t = theme();
        Self::render(frame, area, message, Some("Error"), Some(t.error))
    }

    /// Render a status/info message box
    pub fn render_status(frame: &mut Frame, area: Rect, message: &str) -> Result<()> {
        let t = theme();
        Self::render(frame, area, message, Some("Status"), Some(t.primary))
    }
}
