use crate::styles::theme;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

/// Label of the reset control shown in the header
pub const NEW_UPLOAD_LABEL: &str = "New Upload";

/// Shared header for all screens
pub struct Header;

impl Header {
    /// Render a header with title, description and the optional reset control
    ///
    /// # Arguments
    /// * `frame` - The frame to render to
    /// * `area` - The area to render the header in
    /// * `title` - The title text
    /// * `description` - The description text
    /// * `reset_key` - Key hint for the "New Upload" control, `None` hides it
    ///
    /// # Returns
    /// The height of the header (for layout calculations)
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        description: &str,
        reset_key: Option<&str>,
    ) -> Result<u16> {
        let t = theme();
        let header_block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_focused_style())
            .title(format!(" {} ", title))
            .title_style(t.title_style())
            .title_alignment(Alignment::Center)
            .padding(Padding::new(1, 1, 0, 0));

        let inner_area = header_block.inner(area);
        frame.render_widget(header_block, area);

        let button_width = reset_key
            .map(|key| (NEW_UPLOAD_LABEL.len() + key.chars().count() + 7) as u16)
            .unwrap_or(0);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(button_width)])
            .split(inner_area);

        // Center description vertically
        let desc_lines = description.lines().count() as u16;
        let top_padding = chunks[0].height.saturating_sub(desc_lines) / 2;
        let desc_area = Rect {
            y: chunks[0].y + top_padding,
            height: chunks[0].height - top_padding,
            ..chunks[0]
        };
        let description_para = Paragraph::new(description)
            .style(t.text_style())
            .wrap(Wrap { trim: true });
        frame.render_widget(description_para, desc_area);

        if let Some(key) = reset_key {
            let button = Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("[ {} ", NEW_UPLOAD_LABEL),
                    Style::default().fg(t.primary).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("({})", key), Style::default().fg(t.text_emphasis)),
                Span::styled(" ]", Style::default().fg(t.primary).add_modifier(Modifier::BOLD)),
            ]))
            .alignment(Alignment::Right);
            let button_area = Rect {
                y: chunks[1].y + chunks[1].height.saturating_sub(1) / 2,
                height: chunks[1].height.min(1),
                ..chunks[1]
            };
            frame.render_widget(button, button_area);
        }

        Ok(area.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_text(reset_key: Option<&str>) -> String {
        let backend = TestBackend::new(80, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                Header::render(frame, frame.area(), "podclip", "Pick a video", reset_key).unwrap();
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_reset_control_hidden_without_key() {
        let text = render_to_text(None);
        assert!(text.contains("Pick a video"));
        assert!(!text.contains(NEW_UPLOAD_LABEL));
    }

    #[test]
    fn test_reset_control_shown_with_key() {
        let text = render_to_text(Some("N"));
        assert!(text.contains(NEW_UPLOAD_LABEL));
        assert!(text.contains("(N)"));
    }
}
