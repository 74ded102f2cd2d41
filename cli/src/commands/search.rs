use anyhow::{bail, Result};
use fleet_shared::{
    fleet_api::CarListResponse,
    history::{KeyValueStore, SearchHistory},
    suggest::popular_searches,
    suggest_panel::{PanelOutcome, SuggestPanel},
    FleetDataStore, FleetQuery,
};

/// Submits `query` from the page at `location`, recording it in `history`,
/// and returns the listing the search lands on.
pub fn submit_search<S: KeyValueStore>(
    store: &FleetDataStore,
    history: SearchHistory<S>,
    location: FleetQuery,
    query: &str,
) -> Result<CarListResponse> {
    let mut panel = SuggestPanel::new(popular_searches(store.cars()), history, location);
    match panel.submit(query) {
        PanelOutcome::Navigate(next) => {
            tracing::info!("search `{}` -> {}", query, next.to_href("/fleet"));
            Ok(store.list_cars(&next))
        },
        PanelOutcome::Nothing | PanelOutcome::Closed => bail!("search text is empty"),
    }
}
