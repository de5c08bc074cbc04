pub mod compose;
pub mod feed_panel;
pub mod layout;
pub mod status_bar;

use ratatui::Frame;

use crate::api::MessageApi;
use crate::feed::Feed;

pub use compose::ComposeBox;

/// Main UI renderer
pub struct UI<'a> {
    pub compose: ComposeBox<'a>,
}

impl<'a> UI<'a> {
    pub fn new() -> Self {
        Self {
            compose: ComposeBox::new(),
        }
    }

    /// Render the entire UI
    pub fn render<A: MessageApi>(&mut self, f: &mut Frame, feed: &Feed<A>) {
        let (status_area, feed_area, compose_area, footer_area) = layout::Layout::main(f.area());

        status_bar::render(f, status_area, feed);
        feed_panel::render(f, feed_area, feed);
        self.compose.render(f, compose_area, feed);
        compose::render_footer(f, footer_area, feed);
    }
}

impl<'a> Default for UI<'a> {
    fn default() -> Self {
        Self::new()
    }
}
