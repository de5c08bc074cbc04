use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

use crate::api::MessageApi;
use crate::feed::Feed;

const PLACEHOLDER: &str = "What's happening?";

/// Draft editor
pub struct ComposeBox<'a> {
    pub textarea: TextArea<'a>,
}

impl<'a> ComposeBox<'a> {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(PLACEHOLDER);
        textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        Self { textarea }
    }

    /// Forward a key to the editor. Returns true if the text changed.
    pub fn handle_input(&mut self, key: crossterm::event::KeyEvent) -> bool {
        self.textarea.input(key)
    }

    /// Current draft text
    pub fn content(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Empty the editor after a successful post
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn render<A: MessageApi>(&mut self, f: &mut Frame, area: Rect, feed: &Feed<A>) {
        let border_color = if feed.is_over_limit() {
            Color::Red
        } else if feed.is_loading() {
            Color::DarkGray
        } else {
            Color::Green
        };

        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Post ")
                .border_style(Style::default().fg(border_color)),
        );

        f.render_widget(&self.textarea, area);
    }
}

impl<'a> Default for ComposeBox<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Remaining-character counter; red and bold once negative.
pub fn counter_span(remaining: i64) -> Span<'static> {
    let style = if remaining < 0 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!("{} characters remaining", remaining), style)
}

/// Counter, then either the in-flight marker or the error slot
pub fn render_footer<A: MessageApi>(f: &mut Frame, area: Rect, feed: &Feed<A>) {
    let mut spans = vec![Span::raw(" "), counter_span(feed.remaining())];

    if feed.is_loading() {
        spans.push(Span::styled(
            "  Posting...",
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(error) = feed.error() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
