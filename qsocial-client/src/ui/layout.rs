use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Layout manager for the TUI
pub struct Layout;

impl Layout {
    /// Stack the screen top to bottom
    ///
    /// Returns: (status_area, feed_area, compose_area, footer_area)
    pub fn main(area: Rect) -> (Rect, Rect, Rect, Rect) {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Status bar
                Constraint::Min(3),    // Feed
                Constraint::Length(5), // Draft box
                Constraint::Length(1), // Counter + error line
            ])
            .split(area);

        (chunks[0], chunks[1], chunks[2], chunks[3])
    }
}
