//! Toast notification widget.
//!
//! A short-lived notification drawn in the bottom-right corner above the
//! footer. It never takes input focus.

use crate::styles::theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Info,
    Error,
}

impl ToastVariant {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastVariant::Success => "\u{2714}", // ✔
            ToastVariant::Info => "\u{2139}",    // ℹ
            ToastVariant::Error => "\u{2718}",   // ✘
        }
    }

    pub fn color(&self) -> Color {
        let t = theme();
        match self {
            ToastVariant::Success => t.success,
            ToastVariant::Info => t.primary,
            ToastVariant::Error => t.error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub variant: ToastVariant,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            message: message.into(),
            variant,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Renders a toast in the bottom-right corner of the given area.
pub struct ToastWidget<'a> {
    toast: &'a Toast,
}

impl<'a> ToastWidget<'a> {
    pub fn new(toast: &'a Toast) -> Self {
        Self { toast }
    }

    fn calculate_area(&self, area: Rect) -> Rect {
        let width = 50u16.min(area.width.saturating_sub(4));
        let height = 3u16;
        let x = area.x + area.width.saturating_sub(width + 2);
        let y = area.y + area.height.saturating_sub(height + 3);
        Rect::new(x, y, width, height)
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let toast_area = self.calculate_area(area);
        let t = theme();

        Widget::render(Clear, toast_area, buf);

        let message = format!(" {} {} ", self.toast.variant.icon(), self.toast.message);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.toast.variant.color()))
            .style(Style::default().bg(t.background));

        Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(t.text).add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true })
            .render(toast_area, buf);
    }
}

/// Holds at most one toast at a time
#[derive(Debug, Default)]
pub struct ToastManager {
    current: Option<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast, replacing any existing one
    pub fn push(&mut self, toast: Toast) {
        self.current = Some(toast);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message, ToastVariant::Success));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message, ToastVariant::Info));
    }

    /// Errors stay up longer than the other variants
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message, ToastVariant::Error).with_duration(Duration::from_secs(6)));
    }

    /// Drop the toast once it expired. Returns whether one is still shown.
    pub fn tick(&mut self) -> bool {
        if self.current.as_ref().is_some_and(Toast::is_expired) {
            self.current = None;
        }
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        if let Some(toast) = self.current() {
            frame.render_widget(ToastWidget::new(toast), area);
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_replaces_current() {
        let mut toasts = ToastManager::new();
        toasts.info("first");
        toasts.success("second");
        assert_eq!(toasts.current().map(|t| t.message.as_str()), Some("second"));
    }

    #[test]
    fn test_tick_drops_expired() {
        let mut toasts = ToastManager::new();
        toasts.push(Toast::new("gone", ToastVariant::Info).with_duration(Duration::ZERO));
        assert!(!toasts.tick());
        assert!(toasts.current().is_none());
    }

    #[test]
    fn test_error_lasts_longer() {
        let mut toasts = ToastManager::new();
        toasts.error("boom");
        assert!(toasts.tick());
        assert_eq!(toasts.current().map(|t| t.duration), Some(Duration::from_secs(6)));
    }
}
