//! Terminal front end: key handling and the event loop

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::Backend;
use ratatui::Terminal;

use crate::api::MessageApi;
use crate::feed::{Feed, SubmitOutcome};
use crate::ui::UI;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Submit,
    Reload,
    /// Anything else goes to the draft editor
    Edit,
}

impl Action {
    pub fn for_key(key: &KeyEvent) -> Self {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Action::Quit,
            (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Action::Quit,
            (KeyCode::Char('r'), m) if m.contains(KeyModifiers::CONTROL) => Action::Reload,
            (KeyCode::Enter, _) => Action::Submit,
            _ => Action::Edit,
        }
    }
}

/// Poll for an event with timeout
fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Load the feed, then draw and handle keys until the user quits.
pub async fn run<B: Backend, A: MessageApi>(terminal: &mut Terminal<B>, feed: &mut Feed<A>) -> Result<()> {
    let mut ui = UI::new();

    // A failed first load leaves its sentence in the error slot
    let _ = feed.load().await;

    loop {
        terminal.draw(|f| ui.render(f, feed))?;

        let Some(Event::Key(key)) = poll_event(Duration::from_millis(100))? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match Action::for_key(&key) {
            Action::Quit => break,
            Action::Reload => {
                let _ = feed.load().await;
            }
            Action::Submit => {
                let Some(draft) = feed.begin_submit() else {
                    continue;
                };
                // Show the in-flight state before waiting on the network
                terminal.draw(|f| ui.render(f, feed))?;

                let result = feed.api().create_message(&draft).await;
                if let SubmitOutcome::Posted(message) = feed.finish_submit(result) {
                    tracing::info!(id = %message.id, "posted");
                    ui.compose.clear();
                }
            }
            Action::Edit => {
                if !feed.is_loading() && ui.compose.handle_input(key) {
                    feed.set_draft(ui.compose.content());
                }
            }
        }
    }

    Ok(())
}
