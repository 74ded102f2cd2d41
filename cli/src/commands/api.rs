use anyhow::{bail, Result};
use fleet_shared::{fleet_api::RecentBlogsResponse, BlogQuery, FleetDataStore, FleetQuery};
use serde::Serialize;

use crate::cli::ApiCommands;

pub fn run(store: &FleetDataStore, command: ApiCommands) -> Result<()> {
    match command {
        ApiCommands::Cars {
            query,
        } => {
            let query = FleetQuery::from_query_str(query.as_deref().unwrap_or_default());
            print_json(&store.list_cars(&query))
        },
        ApiCommands::Car {
            slug,
        } => match store.car_detail(&slug) {
            Some(detail) => print_json(&detail),
            None => bail!("car not found: {slug}"),
        },
        ApiCommands::Brands => print_json(&store.list_brands()),
        ApiCommands::BodyTypes => print_json(&store.list_body_types()),
        ApiCommands::PriceRanges => print_json(&store.price_ranges()),
        ApiCommands::Collection {
            id,
            sort,
            page,
        } => print_json(&store.list_collection(id, sort, page)),
        ApiCommands::Suggest {
            q,
        } => print_json(&store.suggest(&q)),
        ApiCommands::Blogs {
            query,
        } => {
            let query = BlogQuery::from_query_str(query.as_deref().unwrap_or_default());
            print_json(&store.list_posts(&query))
        },
        ApiCommands::RecentBlogs => print_json(&RecentBlogsResponse {
            posts: store.recent_posts(),
        }),
        ApiCommands::Blog {
            slug,
        } => match store.get_post(&slug) {
            Some(detail) => print_json(&detail),
            None => bail!("post not found: {slug}"),
        },
        ApiCommands::BlogCategories => print_json(&store.blog_categories()),
        ApiCommands::BlogTags => print_json(&store.blog_tags()),
        ApiCommands::Contact {
            car,
            from,
            to,
        } => print_json(&store.contact(car.as_deref(), from, to)),
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
