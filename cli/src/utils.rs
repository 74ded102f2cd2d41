use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fleet_shared::{
    history::{FileStore, SearchHistory},
    suggest::{highlight_segments, Suggestion},
    suggest_panel::PanelItem,
    vehicle::format_aed,
};

/// Folder under the user data directory used when no `--history-dir` is
/// given.
pub const APP_DIR_NAME: &str = "fleet";

pub fn resolve_history_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir),
        None => dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .context("no user data directory on this platform; pass --history-dir"),
    }
}

pub fn open_history(dir: &Path) -> SearchHistory<FileStore> {
    let store = FileStore::in_dir(dir);
    tracing::debug!("search history file: {}", store.path().display());
    SearchHistory::load(store)
}

/// Wraps the parts of `text` matching `query` in brackets.
pub fn highlight(text: &str, query: &str) -> String {
    highlight_segments(text, query)
        .into_iter()
        .map(|segment| {
            if segment.matched {
                format!("[{}]", segment.text)
            } else {
                segment.text
            }
        })
        .collect()
}

/// One panel row as printed by the prompt.
pub fn render_item(item: PanelItem<'_>, query: &str, selected: bool) -> String {
    let marker = if selected { '>' } else { ' ' };
    let body = match item {
        PanelItem::Popular(text) => format!("popular  {text}"),
        PanelItem::History(text) => format!("recent   {text}"),
        PanelItem::Suggestion(suggestion) => match suggestion {
            Suggestion::Vehicle {
                text,
                category,
                price,
                ..
            } => format!(
                "vehicle  {}  ({}, {}/day)",
                highlight(text, query),
                category.label(),
                format_aed(*price)
            ),
            Suggestion::Brand {
                text, ..
            } => format!("brand    {}", highlight(text, query)),
            Suggestion::Category {
                text, ..
            } => format!("type     {}", highlight(text, query)),
        },
    };
    format!("{marker} {body}")
}
