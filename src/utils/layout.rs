use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Split an area into header, content and footer chunks
pub fn create_standard_layout(
    area: Rect,
    header_height: u16,
    footer_height: u16,
) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(0),
            Constraint::Length(footer_height),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Split an area horizontally, giving `left_percent` to the left side
pub fn create_split_layout(area: Rect, left_percent: u16) -> (Rect, Rect) {
    let left_percent = left_percent.min(100);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left_percent),
            Constraint::Percentage(100 - left_percent),
        ])
        .split(area);
    (chunks[0], chunks[1])
}
