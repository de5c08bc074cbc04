use chrono::Local;
use qsocial_core::Message;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::api::MessageApi;
use crate::feed::Feed;

/// Render the feed in the order the server returned it
pub fn render<A: MessageApi>(f: &mut Frame, area: Rect, feed: &Feed<A>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Feed ")
        .border_style(Style::default().fg(Color::DarkGray));

    let text = if feed.messages().is_empty() {
        Text::from(Line::from(Span::styled(
            "No messages yet.",
            Style::default().fg(Color::DarkGray),
        )))
    } else {
        Text::from(feed.messages().iter().flat_map(message_lines).collect::<Vec<_>>())
    };

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn message_lines(message: &Message) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = message
        .content
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();

    lines.push(Line::from(Span::styled(
        format_time(message),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::default());
    lines
}

fn format_time(message: &Message) -> String {
    message
        .created_at_utc()
        .map(|ts| ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| message.created_at.to_string())
}
