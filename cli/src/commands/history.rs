use fleet_shared::history::{KeyValueStore, SearchHistory, SEARCH_HISTORY_KEY};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HistoryReport {
    pub key: &'static str,
    pub entries: Vec<String>,
}

/// Lists the recent searches, optionally wiping them first.
pub fn history_report<S: KeyValueStore>(mut history: SearchHistory<S>, clear: bool) -> HistoryReport {
    if clear {
        history.clear();
        tracing::info!("search history cleared");
    }
    HistoryReport {
        key: SEARCH_HISTORY_KEY,
        entries: history.entries().to_vec(),
    }
}
