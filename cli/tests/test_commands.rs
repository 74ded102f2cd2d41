#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use fleet_cli::{
        cli::{ApiCommands, Cli, Commands},
        commands::{history::history_report, prompt, search::submit_search},
        utils,
    };
    use fleet_shared::{
        suggest::popular_searches, suggest_panel::SuggestPanel, Brand, Collection, FleetDataStore,
        FleetQuery, SortKey,
    };
    use tempfile::tempdir;

    fn store() -> FleetDataStore {
        FleetDataStore::bundled().expect("bundled data")
    }

    #[test]
    fn search_records_history_and_lists_matches() {
        let dir = tempdir().expect("create temp dir");
        let store = store();

        let response = submit_search(
            &store,
            utils::open_history(dir.path()),
            FleetQuery::from_query_str("sort=price-low&page=3"),
            "Range Rover",
        )
        .expect("search");

        assert_eq!(response.query.filter.search.as_deref(), Some("Range Rover"));
        let page = response.listing.page().expect("matching cars");
        assert!(!page.items.is_empty());
        assert!(page.items.iter().all(|item| item.name.contains("Range Rover")));
        assert_eq!(utils::open_history(dir.path()).entries(), ["Range Rover"]);
    }

    #[test]
    fn blank_search_is_rejected_without_touching_history() {
        let dir = tempdir().expect("create temp dir");
        let result = submit_search(&store(), utils::open_history(dir.path()), FleetQuery::default(), "   ");
        assert!(result.is_err());
        assert!(!dir.path().join("storage.json").exists());
    }

    #[test]
    fn history_report_lists_then_clears() {
        let dir = tempdir().expect("create temp dir");
        let mut history = utils::open_history(dir.path());
        history.push("roma");
        history.push("ghost");

        let report = history_report(utils::open_history(dir.path()), false);
        assert_eq!(report.key, "vehicle-search-history");
        assert_eq!(report.entries, ["ghost", "roma"]);

        let report = history_report(utils::open_history(dir.path()), true);
        assert!(report.entries.is_empty());
        assert!(utils::open_history(dir.path()).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn prompt_selects_vehicle_suggestion_with_keys() {
        let dir = tempdir().expect("create temp dir");
        let store = store();
        let mut panel = SuggestPanel::new(
            popular_searches(store.cars()),
            utils::open_history(dir.path()),
            FleetQuery::default(),
        );
        let mut out = Vec::new();

        let landed = prompt::drive(
            &store,
            &mut panel,
            Duration::from_millis(300),
            &b"fer\n:down\n:enter\n"[..],
            &mut out,
        )
        .await
        .expect("prompt runs");

        let landed = landed.expect("enter navigates");
        assert_eq!(landed.filter.search.as_deref(), Some("Ferrari SF90 Stradale"));
        assert_eq!(utils::open_history(dir.path()).entries(), ["Ferrari SF90 Stradale"]);

        let out = String::from_utf8(out).expect("utf8 output");
        assert!(out.contains("> vehicle  [Fer]rari SF90 Stradale"));
        assert!(out.contains("brand    [Fer]rari"));
        assert!(out.contains("-> /fleet?"));
    }

    #[tokio::test(start_paused = true)]
    async fn prompt_brand_suggestion_applies_filter_and_skips_history() {
        let dir = tempdir().expect("create temp dir");
        let store = store();
        let mut panel = SuggestPanel::new(
            popular_searches(store.cars()),
            utils::open_history(dir.path()),
            FleetQuery::from_query_str("search=old"),
        );
        let mut out = Vec::new();

        // Up from no selection wraps to the last row, the brand.
        let landed = prompt::drive(
            &store,
            &mut panel,
            Duration::from_millis(300),
            &b"ferrari\n:up\n:enter\n"[..],
            &mut out,
        )
        .await
        .expect("prompt runs")
        .expect("enter navigates");

        assert_eq!(landed.filter.brand, Some(Brand::Ferrari));
        assert_eq!(landed.filter.search, None);
        assert!(utils::open_history(dir.path()).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn prompt_escape_closes_panel_and_ignores_later_keys() {
        let dir = tempdir().expect("create temp dir");
        let store = store();
        let mut panel = SuggestPanel::new(
            popular_searches(store.cars()),
            utils::open_history(dir.path()),
            FleetQuery::default(),
        );
        let mut out = Vec::new();

        let landed = prompt::drive(
            &store,
            &mut panel,
            Duration::from_millis(300),
            &b"f\n:esc\n:enter\n"[..],
            &mut out,
        )
        .await
        .expect("prompt runs");

        assert!(landed.is_none());
        assert!(!panel.is_open());
        assert!(panel.suggestions().is_empty());
        let out = String::from_utf8(out).expect("utf8 output");
        assert!(out.contains("(closed)"));
    }

    #[tokio::test(start_paused = true)]
    async fn prompt_clear_command_wipes_history() {
        let dir = tempdir().expect("create temp dir");
        let mut history = utils::open_history(dir.path());
        history.push("urus");
        let store = store();
        let mut panel = SuggestPanel::new(
            popular_searches(store.cars()),
            utils::open_history(dir.path()),
            FleetQuery::default(),
        );
        let mut out = Vec::new();

        prompt::drive(&store, &mut panel, Duration::from_millis(300), &b":clear\n"[..], &mut out)
            .await
            .expect("prompt runs");

        assert!(panel.history().is_empty());
        assert!(utils::open_history(dir.path()).is_empty());
        let out = String::from_utf8(out).expect("utf8 output");
        assert!(out.contains("recent   urus"));
        assert!(out.contains("(history cleared)"));
    }

    #[test]
    fn collection_command_parses_sort() {
        let cli = Cli::try_parse_from(["fleet-cli", "api", "collection", "luxury", "--sort", "price-low"])
            .expect("valid args");
        let Commands::Api {
            command: ApiCommands::Collection {
                id,
                sort,
                page,
            },
        } = cli.command
        else {
            panic!("expected api collection");
        };
        assert_eq!(id, Collection::Luxury);
        assert_eq!(sort, SortKey::PriceLow);
        assert_eq!(page, 1);

        assert!(Cli::try_parse_from(["fleet-cli", "api", "collection", "luxury", "--sort", "cheapest"]).is_err());
    }

    #[test]
    fn recent_blogs_command_is_kebab_case() {
        let cli = Cli::try_parse_from(["fleet-cli", "api", "recent-blogs"]).expect("valid args");
        assert!(matches!(
            cli.command,
            Commands::Api {
                command: ApiCommands::RecentBlogs
            }
        ));
        let recent = store().recent_posts();
        assert!(!recent.is_empty());
    }
}
