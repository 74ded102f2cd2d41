//! Line-driven search box: every input line is a key press, `:clear`, or
//! the new contents of the box.

use std::{io::Write, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use fleet_shared::{
    debounce::SuggestSession,
    history::KeyValueStore,
    suggest_panel::{Key, PanelOutcome, SuggestPanel},
    FleetDataStore, FleetQuery,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::utils::render_item;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    Key(Key),
    ClearHistory,
    Query(String),
}

pub fn parse_line(line: &str) -> PromptInput {
    match line.trim() {
        ":down" => PromptInput::Key(Key::Down),
        ":up" => PromptInput::Key(Key::Up),
        ":enter" => PromptInput::Key(Key::Enter),
        ":esc" => PromptInput::Key(Key::Escape),
        ":clear" => PromptInput::ClearHistory,
        _ => PromptInput::Query(line.to_string()),
    }
}

/// Feeds `input` through `panel` until EOF, echoing the panel to `out`.
/// Returns the last location navigated to, if any.
pub async fn drive<S, R, W>(
    store: &FleetDataStore,
    panel: &mut SuggestPanel<S>,
    delay: Duration,
    input: R,
    out: &mut W,
) -> Result<Option<FleetQuery>>
where
    S: KeyValueStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = SuggestSession::with_delay(Arc::new(store.cars().to_vec()), delay);
    let mut updates = session.subscribe();
    let mut lines = input.lines();
    let mut landed = None;

    panel.open();
    render(panel, out)?;
    while let Some(line) = lines.next_line().await.context("failed to read prompt input")? {
        match parse_line(&line) {
            PromptInput::Query(text) => {
                panel.set_query(&text);
                // Short queries publish at once, longer ones after the delay.
                session.on_query(&text);
                updates
                    .changed()
                    .await
                    .context("suggest session stopped")?;
                let update = updates.borrow_and_update().clone();
                panel.set_suggestions(&update.query, update.suggestions);
            },
            PromptInput::ClearHistory => {
                panel.clear_history();
                writeln!(out, "(history cleared)")?;
            },
            PromptInput::Key(key) => match panel.handle_key(key) {
                PanelOutcome::Navigate(next) => {
                    writeln!(out, "-> {}", next.to_href("/fleet"))?;
                    landed = Some(next);
                },
                PanelOutcome::Closed => writeln!(out, "(closed)")?,
                PanelOutcome::Nothing => {},
            },
        }
        render(panel, out)?;
    }
    Ok(landed)
}

fn render<S: KeyValueStore, W: Write>(panel: &SuggestPanel<S>, out: &mut W) -> Result<()> {
    if !panel.is_open() {
        return Ok(());
    }
    writeln!(out, "search: {}", panel.query())?;
    for (idx, item) in panel.items().into_iter().enumerate() {
        let selected = panel.selected() == Some(idx);
        writeln!(out, "{}", render_item(item, panel.query(), selected))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_commands_and_text_are_told_apart() {
        assert_eq!(parse_line(":down"), PromptInput::Key(Key::Down));
        assert_eq!(parse_line(" :esc "), PromptInput::Key(Key::Escape));
        assert_eq!(parse_line(":clear"), PromptInput::ClearHistory);
        assert_eq!(parse_line("range rover"), PromptInput::Query("range rover".to_string()));
        assert_eq!(parse_line(""), PromptInput::Query(String::new()));
    }
}
