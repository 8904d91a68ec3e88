//! Editor screen.
//!
//! Lists the transcript segments and builds clips from ranges of them.
//! `MarkStart`/`MarkEnd` set the range over segment indices, `AddClip`
//! records it and `Save` writes every recorded clip through [`ClipExporter`].

use crate::components::MessageBox;
use crate::keymap::Action;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::{Clip, ClipExporter};
use crate::state::ScreenView;
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::transcript::{format_timestamp, Transcript};
use crate::utils::{create_split_layout, format_path_for_display, format_size};
use crate::widgets::ToastVariant;
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use std::ops::RangeInclusive;
use tracing::{info, warn};

const PAGE_SIZE: usize = 10;

#[derive(Default)]
pub struct EditorScreen {
    transcript: Option<Transcript>,
    load_error: Option<String>,
    list_state: ListState,
    mark_start: Option<usize>,
    mark_end: Option<usize>,
    clips: Vec<Clip>,
}

impl EditorScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Segment indices covered by the current marks
    pub fn marked_range(&self) -> Option<RangeInclusive<usize>> {
        match (self.mark_start, self.mark_end) {
            (Some(start), Some(end)) => Some(start.min(end)..=start.max(end)),
            (Some(only), None) | (None, Some(only)) => Some(only..=only),
            (None, None) => None,
        }
    }

    fn segment_count(&self) -> usize {
        self.transcript.as_ref().map_or(0, Transcript::len)
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.segment_count();
        if count == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(count - 1);
        self.list_state.select(Some(next));
    }

    fn add_clip(&mut self) -> ScreenAction {
        let (Some(transcript), Some(range)) = (&self.transcript, self.marked_range()) else {
            return ScreenAction::toast("Mark a start segment first", ToastVariant::Info);
        };
        match Clip::from_segments(&transcript.segments[range]) {
            Ok(clip) => {
                let message = format!(
                    "Added clip {} ({} - {})",
                    self.clips.len() + 1,
                    format_timestamp(clip.start),
                    format_timestamp(clip.end)
                );
                self.clips.push(clip);
                self.mark_start = None;
                self.mark_end = None;
                ScreenAction::toast(message, ToastVariant::Success)
            }
            Err(e) => ScreenAction::toast(e.to_string(), ToastVariant::Error),
        }
    }

    fn save(&self, ctx: &ScreenContext) -> ScreenAction {
        let Some(video) = ctx.controller.video() else {
            return ScreenAction::None;
        };
        let exporter = ClipExporter::new(&ctx.config.export_dir);
        match exporter.export(video, &self.clips) {
            Ok(path) => ScreenAction::toast(
                format!("Saved {} clips to {}", self.clips.len(), format_path_for_display(&path)),
                ToastVariant::Success,
            ),
            Err(e) => {
                warn!("Clip export failed: {:#}", e);
                ScreenAction::toast(format!("{:#}", e), ToastVariant::Error)
            }
        }
    }

    fn segment_items(&self, transcript: &Transcript) -> Vec<ListItem<'static>> {
        let t = theme();
        let marked = self.marked_range();
        transcript
            .segments
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                let in_range = marked.as_ref().is_some_and(|r| r.contains(&i));
                let marker = if in_range { "▌" } else { " " };
                let mut spans = vec![
                    Span::styled(marker, Style::default().fg(t.warning)),
                    Span::styled(
                        format!(
                            "[{} – {}] ",
                            format_timestamp(segment.start),
                            format_timestamp(segment.end)
                        ),
                        t.muted_style(),
                    ),
                ];
                if let Some(speaker) = &segment.speaker {
                    spans.push(Span::styled(
                        format!("{}: ", speaker),
                        Style::default().fg(t.secondary),
                    ));
                }
                spans.push(Span::styled(segment.text.clone(), t.text_style()));
                ListItem::new(Line::from(spans))
            })
            .collect()
    }

    fn clip_lines(&self) -> Vec<Line<'static>> {
        let t = theme();
        if self.clips.is_empty() {
            return vec![Line::from(Span::styled("No clips yet", t.muted_style()))];
        }
        self.clips
            .iter()
            .enumerate()
            .flat_map(|(i, clip)| {
                [
                    Line::from(vec![
                        Span::styled(
                            format!("{}. ", i + 1),
                            Style::default().fg(t.text_emphasis),
                        ),
                        Span::styled(
                            format!(
                                "{} – {} ({:.1}s)",
                                format_timestamp(clip.start),
                                format_timestamp(clip.end),
                                clip.duration()
                            ),
                            Style::default().fg(t.primary),
                        ),
                    ]),
                    Line::from(Span::styled(format!("   {}", clip.text), t.muted_style())),
                ]
            })
            .collect()
    }
}

impl Screen for EditorScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let ScreenView::Editor { file, .. } = ctx.controller.view() else {
            return Ok(());
        };
        let t = theme();

        let Some(transcript) = &self.transcript else {
            let message = self
                .load_error
                .as_deref()
                .unwrap_or("No transcription available");
            return MessageBox::render_error(frame, area, message);
        };

        let (list_area, clips_area) = create_split_layout(area, 65);

        let title = format!(
            " {} ({}) - {} segments ",
            file.name(),
            format_size(file.size_bytes),
            transcript.len()
        );
        let list_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(title);

        if transcript.is_empty() {
            let empty = Paragraph::new("The transcript has no segments.")
                .style(t.muted_style())
                .block(list_block);
            frame.render_widget(empty, list_area);
        } else {
            let list = List::new(self.segment_items(transcript))
                .block(list_block)
                .highlight_style(t.highlight_style())
                .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
            frame.render_stateful_widget(list, list_area, &mut self.list_state);
        }

        let clips_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(Span::styled(
                format!(" Clips ({}) ", self.clips.len()),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        let clips = Paragraph::new(self.clip_lines())
            .block(clips_block)
            .wrap(Wrap { trim: false });
        frame.render_widget(clips, clips_area);

        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        let Some(action) = ctx.config.keymap.get_action(key.code, key.modifiers) else {
            return Ok(ScreenAction::None);
        };

        let result = match action {
            Action::MoveUp => {
                self.move_selection(-1);
                ScreenAction::None
            }
            Action::MoveDown => {
                self.move_selection(1);
                ScreenAction::None
            }
            Action::PageUp => {
                self.move_selection(-(PAGE_SIZE as isize));
                ScreenAction::None
            }
            Action::PageDown => {
                self.move_selection(PAGE_SIZE as isize);
                ScreenAction::None
            }
            Action::GoToTop => {
                if self.segment_count() > 0 {
                    self.list_state.select(Some(0));
                }
                ScreenAction::None
            }
            Action::GoToEnd => {
                if let Some(last) = self.segment_count().checked_sub(1) {
                    self.list_state.select(Some(last));
                }
                ScreenAction::None
            }
            Action::MarkStart => {
                self.mark_start = self.list_state.selected();
                ScreenAction::None
            }
            Action::MarkEnd => {
                self.mark_end = self.list_state.selected();
                ScreenAction::None
            }
            Action::Cancel => {
                self.mark_start = None;
                self.mark_end = None;
                ScreenAction::None
            }
            Action::AddClip | Action::Confirm => self.add_clip(),
            Action::DeleteClip => match self.clips.pop() {
                Some(_) => ScreenAction::toast("Removed last clip", ToastVariant::Info),
                None => ScreenAction::None,
            },
            Action::Save => self.save(ctx),
            _ => ScreenAction::None,
        };
        Ok(result)
    }

    fn footer_text(&self, ctx: &RenderContext) -> String {
        let k = &ctx.config.keymap;
        format!(
            "{}: Navigate | {}/{}: Mark | {}: Add Clip | {}: Save | {}: New Upload | {}: Quit",
            k.navigation_display(),
            k.key_for(Action::MarkStart),
            k.key_for(Action::MarkEnd),
            k.key_for(Action::AddClip),
            k.key_for(Action::Save),
            k.key_for(Action::NewUpload),
            k.key_for(Action::Quit),
        )
    }

    fn on_enter(&mut self, ctx: &ScreenContext) -> Result<()> {
        *self = Self::default();
        let Some(result) = ctx.controller.transcription() else {
            return Ok(());
        };
        match Transcript::from_result(result) {
            Ok(transcript) => {
                info!("Editor loaded {} segments", transcript.len());
                if !transcript.is_empty() {
                    self.list_state.select(Some(0));
                }
                self.transcript = Some(transcript);
            }
            Err(e) => {
                warn!("Could not read transcription: {:#}", e);
                self.load_error = Some(format!("{:#}", e));
            }
        }
        Ok(())
    }

    fn on_exit(&mut self, _ctx: &ScreenContext) -> Result<()> {
        *self = Self::default();
        Ok(())
    }
}
