pub mod api;
pub mod history;
pub mod prompt;
pub mod search;

use anyhow::Result;
use fleet_shared::{
    suggest::{popular_searches, SUGGEST_DEBOUNCE},
    suggest_panel::SuggestPanel,
    FleetDataStore, FleetQuery,
};
use tokio::io::BufReader;

use crate::{
    cli::{Cli, Commands},
    utils::{open_history, resolve_history_dir},
};

pub async fn run(cli: Cli) -> Result<()> {
    let store = FleetDataStore::bundled()?;
    tracing::debug!(
        "catalog: {} cars, {} posts",
        store.cars().len(),
        store.posts().len()
    );

    match cli.command {
        Commands::Api {
            command,
        } => api::run(&store, command),
        Commands::Search {
            query,
            params,
        } => {
            let history = open_history(&resolve_history_dir(cli.history_dir)?);
            let location = FleetQuery::from_query_str(params.as_deref().unwrap_or_default());
            let listing = search::submit_search(&store, history, location, &query)?;
            api::print_json(&listing)
        },
        Commands::History {
            clear,
        } => {
            let history = open_history(&resolve_history_dir(cli.history_dir)?);
            api::print_json(&history::history_report(history, clear))
        },
        Commands::Prompt {
            params,
        } => {
            let history = open_history(&resolve_history_dir(cli.history_dir)?);
            let location = FleetQuery::from_query_str(params.as_deref().unwrap_or_default());
            let mut panel = SuggestPanel::new(popular_searches(store.cars()), history, location);
            let input = BufReader::new(tokio::io::stdin());
            let mut out = std::io::stdout();
            let landed =
                prompt::drive(&store, &mut panel, SUGGEST_DEBOUNCE, input, &mut out).await?;
            match landed {
                Some(next) => api::print_json(&store.list_cars(&next)),
                None => Ok(()),
            }
        },
    }
}
