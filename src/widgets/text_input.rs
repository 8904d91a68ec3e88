//! Text input widget for rendering [`TextInput`] instances.

use crate::styles::theme;
use crate::utils::text_input::TextInput;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Renders a [`TextInput`] with a rounded border, optional placeholder and
/// an error state.
///
/// # Example
/// ```
/// use podclip::utils::TextInput;
/// use podclip::widgets::TextInputWidget;
///
/// let input = TextInput::with_text("episode.mp4");
/// let widget = TextInputWidget::new(&input)
///     .title("Video file")
///     .placeholder("Path to a video...")
///     .focused(true);
/// // frame.render_text_input_widget(widget, area);
/// ```
pub struct TextInputWidget<'a> {
    input: &'a TextInput,
    title: Option<&'a str>,
    placeholder: Option<&'a str>,
    focused: bool,
    error: bool,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(input: &'a TextInput) -> Self {
        Self {
            input,
            title: None,
            placeholder: None,
            focused: false,
            error: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Draw the border in the error color.
    pub fn error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    fn display_text(&self) -> &str {
        if self.input.text().is_empty() {
            self.placeholder.unwrap_or("")
        } else {
            self.input.text()
        }
    }

    fn block(&self) -> Block<'a> {
        let t = theme();
        let border_style = if self.error {
            Style::default().fg(t.error)
        } else if self.focused {
            t.border_focused_style()
        } else {
            t.border_style()
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        if let Some(title) = self.title {
            block = block.title(format!(" {} ", title));
        }
        block
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let style = if self.input.text().is_empty() {
            t.muted_style()
        } else {
            t.text_style()
        };

        Paragraph::new(self.display_text().to_string())
            .block(self.block())
            .style(style)
            .render(area, buf);
    }
}

/// Extension trait for Frame to render a [`TextInputWidget`] and place the
/// terminal cursor inside it.
pub trait TextInputWidgetExt {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect);
}

impl TextInputWidgetExt for Frame<'_> {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect) {
        let focused = widget.focused;
        let cursor = widget.input.cursor();
        let inner = widget.block().inner(area);

        self.render_widget(widget, area);

        if focused {
            let x = inner.x + cursor.min(inner.width.saturating_sub(1) as usize) as u16;
            self.set_cursor_position((x, inner.y));
        }
    }
}
