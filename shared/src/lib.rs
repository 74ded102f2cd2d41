//! Core of the fleet catalog: data model, bundled fleet and blog data,
//! the filter/sort/paginate pipeline, search suggestions with history,
//! contact links and the [`FleetDataStore`] facade used by the backend and
//! the CLI.

pub mod blog;
pub mod blog_query;
pub mod contact;
pub mod debounce;
pub mod fleet_api;
pub mod fleet_query;
pub mod history;
pub mod listing;
pub mod pagination;
pub mod suggest;
pub mod suggest_panel;
pub mod taxonomy;
pub mod vehicle;

#[cfg(test)]
mod pipeline_proptests;

pub use blog::{BlogCategory, BlogListItem, BlogPost};
pub use blog_query::BlogQuery;
pub use fleet_api::FleetDataStore;
pub use fleet_query::FleetQuery;
pub use listing::{FleetFilter, SortKey};
pub use pagination::{Listing, Page, PageSlot};
pub use taxonomy::{BodyType, Brand, Collection, PriceRange, UnknownIdError};
pub use vehicle::{Car, CarListItem};
