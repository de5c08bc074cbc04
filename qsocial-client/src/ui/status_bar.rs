use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::api::MessageApi;
use crate::feed::Feed;

/// Render the status bar (top bar)
pub fn render<A: MessageApi>(f: &mut Frame, area: Rect, feed: &Feed<A>) {
    let (label, color) = if feed.is_loading() {
        ("POSTING", Color::Yellow)
    } else {
        ("READY", Color::Cyan)
    };

    let spans = vec![
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled("Q-Social", Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(
            format!("{} messages", feed.messages().len()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            "Enter post · Ctrl+R reload · Esc quit",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(paragraph, area);
}
