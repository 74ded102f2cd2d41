//! Fleet filter -> sort -> paginate pipeline.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    fleet_query::FleetQuery,
    pagination::{paginate, Listing},
    taxonomy::{id_table, BodyType, Brand, Collection, PriceRange},
    vehicle::{Car, CarListItem},
};

pub const CARS_PER_PAGE: usize = 12;
pub const SIMILAR_CARS_LIMIT: usize = 4;

id_table! {
    /// Ordering applied after filtering.
    #[derive(Default)]
    SortKey, "sort" {
        #[default]
        Featured => ("featured", "Featured"),
        PriceLow => ("price-low", "Price: Low to High"),
        PriceHigh => ("price-high", "Price: High to Low"),
        NameAsc => ("name-asc", "Name: A to Z"),
        Newest => ("newest", "Newest First"),
    }
}

/// Structured filters; every supplied field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetFilter {
    #[serde(default)]
    pub category: Option<BodyType>,
    #[serde(default)]
    pub brand: Option<Brand>,
    #[serde(default)]
    pub price: Option<PriceRange>,
    #[serde(default)]
    pub search: Option<String>,
}

impl FleetFilter {
    pub fn has_filters(&self) -> bool {
        self.category.is_some() || self.brand.is_some() || self.price.is_some() || self.search.is_some()
    }

    /// Predicate over one car; availability is checked separately.
    pub fn matches(&self, car: &Car) -> bool {
        self.matches_with_needle(car, self.search_needle().as_deref())
    }

    fn search_needle(&self) -> Option<String> {
        self.search.as_deref().map(str::to_lowercase)
    }

    fn matches_with_needle(&self, car: &Car, needle: Option<&str>) -> bool {
        self.category.map_or(true, |category| car.category == category)
            && self.brand.map_or(true, |brand| car.brand == brand)
            && self.price.map_or(true, |range| range.contains(car.pricing.daily))
            && needle.map_or(true, |needle| car.matches_text(needle))
    }
}

/// Available cars matching every supplied filter, in collection order.
pub fn filter_cars<'a>(cars: &'a [Car], filter: &FleetFilter) -> Vec<&'a Car> {
    let needle = filter.search_needle();
    cars.iter()
        .filter(|car| car.is_available)
        .filter(|car| filter.matches_with_needle(car, needle.as_deref()))
        .collect()
}

/// Stable sort; equal keys keep their incoming order.
pub fn sort_cars(cars: &mut [&Car], key: SortKey) {
    cars.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &Car, b: &Car, key: SortKey) -> Ordering {
    match key {
        SortKey::PriceLow => a.pricing.daily.cmp(&b.pricing.daily),
        SortKey::PriceHigh => b.pricing.daily.cmp(&a.pricing.daily),
        SortKey::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Newest => b.year.cmp(&a.year),
        SortKey::Featured => b
            .is_featured
            .cmp(&a.is_featured)
            .then_with(|| b.pricing.daily.cmp(&a.pricing.daily)),
    }
}

/// Runs the whole pipeline for one catalog state.
pub fn run_fleet_query(cars: &[Car], query: &FleetQuery) -> Listing<CarListItem> {
    let mut matched = filter_cars(cars, &query.filter);
    sort_cars(&mut matched, query.sort);
    paginate(&matched, query.page, CARS_PER_PAGE).map(CarListItem::from)
}

/// Available cars in a marketing collection, in `sort` order.
pub fn collection_cars(cars: &[Car], collection: Collection, sort: SortKey) -> Vec<&Car> {
    let mut matched: Vec<&Car> = cars
        .iter()
        .filter(|car| car.is_available && collection.matches(car))
        .collect();
    sort_cars(&mut matched, sort);
    matched
}

/// Available cars sharing the brand or body type, excluding `car` itself.
pub fn similar_cars<'a>(cars: &'a [Car], car: &Car, limit: usize) -> Vec<&'a Car> {
    cars.iter()
        .filter(|other| {
            other.id != car.id
                && other.is_available
                && (other.brand == car.brand || other.category == car.category)
        })
        .take(limit)
        .collect()
}
