//! Help Overlay Component
//!
//! Displays current keybindings when user presses the help key.

use crate::keymap::Keymap;
use crate::styles::theme;
use anyhow::Result;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Renders the help overlay showing current keybindings
pub struct HelpOverlay;

impl HelpOverlay {
    /// Render the help overlay in the center of the screen
    pub fn render(frame: &mut Frame, area: Rect, keymap: &Keymap, config_path: &str) -> Result<()> {
        let theme = theme();

        let popup_width = (f32::from(area.width) * 0.80).min(90.0) as u16;
        let popup_height = (f32::from(area.height) * 0.90).min(40.0) as u16;
        let popup_x = area.x + area.width.saturating_sub(popup_width) / 2;
        let popup_y = area.y + area.height.saturating_sub(popup_height) / 2;
        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let title = format!(" Keyboard Shortcuts - {} Preset ", keymap.preset.name());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(theme.primary));

        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(inner_area);

        let bindings = keymap.all_bindings();
        let mut lines: Vec<Line> = vec![Line::from("")];

        let mut current_category = "";
        for binding in &bindings {
            let category = binding.action.category();
            if category != current_category {
                if !current_category.is_empty() {
                    lines.push(Line::from(""));
                }
                lines.push(Line::from(vec![Span::styled(
                    format!("  {} ", category),
                    Style::default()
                        .fg(theme.secondary)
                        .add_modifier(Modifier::BOLD),
                )]));
                current_category = category;
            }

            lines.push(Line::from(vec![
                Span::styled(
                    format!("    {:12}", binding.display()),
                    Style::default().fg(theme.text_emphasis),
                ),
                Span::raw(binding.get_description().to_string()),
            ]));
        }

        let bindings_paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Left);
        frame.render_widget(bindings_paragraph, chunks[0]);

        let footer_text = format!(
            "Edit keybindings in: {}\nPress any key to close",
            config_path
        );
        let footer = Paragraph::new(footer_text)
            .style(Style::default().fg(theme.text_muted))
            .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[1]);

        Ok(())
    }
}
