use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fleet_shared::{Collection, SortKey};

#[derive(Parser)]
#[command(name = "fleet-cli", version, about = "Luxury fleet catalog CLI")]
pub struct Cli {
    /// Directory holding the local search history
    /// (defaults to the user data directory).
    #[arg(long, global = true, env = "FLEET_HISTORY_DIR")]
    pub history_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Backend-like API commands over the bundled catalog.
    Api {
        #[command(subcommand)]
        command: ApiCommands,
    },
    /// Submit a free-text search: records it in history and prints the
    /// matching fleet listing.
    Search {
        /// Search text.
        query: String,
        /// Extra listing params, e.g. `sort=price-low&page=2`.
        #[arg(long)]
        params: Option<String>,
    },
    /// Show the recent searches.
    History {
        /// Remove every entry instead of listing them.
        #[arg(long)]
        clear: bool,
    },
    /// Interactive search box over stdin.
    ///
    /// Each line is a new query, except `:down`, `:up`, `:enter` and
    /// `:esc` which act as the matching keys, and `:clear` which wipes the
    /// recent searches.
    Prompt {
        /// Listing params of the page the box is shown on.
        #[arg(long)]
        params: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ApiCommands {
    /// GET /api/cars?<query>
    Cars {
        /// Raw query string, e.g. `brand=ferrari&sort=price-high`.
        query: Option<String>,
    },
    /// GET /api/cars/:slug
    Car {
        /// Car slug.
        slug: String,
    },
    /// GET /api/brands
    Brands,
    /// GET /api/body-types
    BodyTypes,
    /// GET /api/price-ranges
    PriceRanges,
    /// GET /api/collections/:id
    Collection {
        /// Collection id, e.g. `new-arrivals`.
        id: Collection,
        /// Sort id, e.g. `price-low`.
        #[arg(long, default_value_t = SortKey::Featured)]
        sort: SortKey,
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// GET /api/suggest?q=
    Suggest {
        /// Text typed so far.
        #[arg(default_value = "")]
        q: String,
    },
    /// GET /api/blogs?<query>
    Blogs {
        /// Raw query string, e.g. `tag=road%20trips`.
        query: Option<String>,
    },
    /// GET /api/blogs/recent
    RecentBlogs,
    /// GET /api/blogs/:slug
    Blog {
        /// Post slug.
        slug: String,
    },
    /// GET /api/blog-categories
    BlogCategories,
    /// GET /api/blog-tags
    BlogTags,
    /// GET /api/contact?car=&from=&to=
    Contact {
        /// Car slug to ask about.
        #[arg(long)]
        car: Option<String>,
        /// Rental start date (`YYYY-MM-DD`).
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Rental end date (`YYYY-MM-DD`).
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}
