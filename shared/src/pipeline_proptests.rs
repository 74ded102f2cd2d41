use proptest::prelude::*;

use crate::{
    fleet_query::FleetQuery,
    history::{MemoryStore, SearchHistory, MAX_HISTORY_ENTRIES},
    listing::{filter_cars, run_fleet_query, sort_cars, FleetFilter, SortKey, CARS_PER_PAGE},
    taxonomy::{BodyType, Brand, PriceRange},
    vehicle::{fixtures, Car, CarListItem},
};

fn car_strategy() -> impl Strategy<Value = Car> {
    (
        "[A-Za-z]{1,8}( [A-Za-z0-9]{1,4})?",
        prop::sample::select(Brand::ALL),
        prop::sample::select(BodyType::ALL),
        100u32..8_000,
        2018u16..2026,
        any::<bool>(),
        prop::bool::weighted(0.85),
    )
        .prop_map(|(name, brand, category, daily, year, featured, available)| {
            let mut car = fixtures::car(&name, brand, category, daily, year, featured);
            car.is_available = available;
            car
        })
}

/// Fleet with unique ids so original positions can be recovered.
fn fleet_strategy() -> impl Strategy<Value = Vec<Car>> {
    prop::collection::vec(car_strategy(), 0..40).prop_map(|mut cars| {
        for (idx, car) in cars.iter_mut().enumerate() {
            car.id = format!("car-{idx}");
            car.slug = format!("{}-{idx}", car.slug);
        }
        cars
    })
}

fn filter_strategy() -> impl Strategy<Value = FleetFilter> {
    (
        prop::option::of(prop::sample::select(BodyType::ALL)),
        prop::option::of(prop::sample::select(Brand::ALL)),
        prop::option::of(prop::sample::select(PriceRange::ALL)),
        prop::option::of("[a-z]{1,3}"),
    )
        .prop_map(|(category, brand, price, search)| FleetFilter {
            category,
            brand,
            price,
            search,
        })
}

fn sort_strategy() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL)
}

fn position(car: &Car) -> usize {
    car.id.trim_start_matches("car-").parse().unwrap_or(usize::MAX)
}

/// Comparable projection of the field a sort key orders by.
fn sort_field(car: &Car, key: SortKey) -> (bool, u32, u16, String) {
    match key {
        SortKey::PriceLow | SortKey::PriceHigh => (false, car.pricing.daily, 0, String::new()),
        SortKey::NameAsc => (false, 0, 0, car.name.to_lowercase()),
        SortKey::Newest => (false, 0, car.year, String::new()),
        SortKey::Featured => (car.is_featured, car.pricing.daily, 0, String::new()),
    }
}

proptest! {
    /// Filtering keeps exactly the available cars that satisfy every predicate.
    #[test]
    fn prop_filter_matches_predicate(fleet in fleet_strategy(), filter in filter_strategy()) {
        let matched: Vec<String> = filter_cars(&fleet, &filter).iter().map(|car| car.id.clone()).collect();
        let expected: Vec<String> = fleet
            .iter()
            .filter(|car| car.is_available && filter.matches(car))
            .map(|car| car.id.clone())
            .collect();
        prop_assert_eq!(matched, expected);
    }

    /// Sorting twice changes nothing, and ties keep collection order.
    #[test]
    fn prop_sort_is_idempotent_and_stable(fleet in fleet_strategy(), key in sort_strategy()) {
        let mut once = filter_cars(&fleet, &FleetFilter::default());
        sort_cars(&mut once, key);
        let mut twice = once.clone();
        sort_cars(&mut twice, key);
        prop_assert_eq!(&once, &twice);

        for pair in once.windows(2) {
            if sort_field(pair[0], key) == sort_field(pair[1], key) {
                prop_assert!(position(pair[0]) < position(pair[1]));
            }
        }
    }

    /// Walking pages 1..=total reproduces the full sorted result.
    #[test]
    fn prop_pages_concatenate_to_sorted_list(
        fleet in fleet_strategy(),
        filter in filter_strategy(),
        key in sort_strategy()
    ) {
        let mut sorted = filter_cars(&fleet, &filter);
        sort_cars(&mut sorted, key);
        let expected: Vec<CarListItem> = sorted.into_iter().map(CarListItem::from).collect();

        let base = FleetQuery { filter, sort: key, page: 1 };
        let first = run_fleet_query(&fleet, &base);
        let total_pages = first.page().map_or(0, |page| page.total_pages);
        prop_assert_eq!(total_pages, expected.len().div_ceil(CARS_PER_PAGE));

        let mut walked = Vec::new();
        for page in 1..=total_pages {
            let listing = run_fleet_query(&fleet, &base.with_page(page));
            let served = listing.page().map(|served| (served.page, served.page_reset));
            prop_assert_eq!(served, Some((page, false)));
            walked.extend(listing.items().iter().cloned());
        }
        prop_assert_eq!(walked, expected);
    }

    /// Any page past the end is served as page 1 and flagged.
    #[test]
    fn prop_out_of_range_page_resets(fleet in fleet_strategy(), extra in 1usize..50) {
        let first = run_fleet_query(&fleet, &FleetQuery::default());
        if let Some(page) = first.page() {
            let beyond = FleetQuery::default().with_page(page.total_pages + extra);
            let listing = run_fleet_query(&fleet, &beyond);
            let served = listing.page().map(|served| (served.page, served.page_reset));
            prop_assert_eq!(served, Some((1, true)));
        }
    }

    /// History stays capped, duplicate-free, and the latest push is first.
    #[test]
    fn prop_history_is_capped_and_unique(pushes in prop::collection::vec("[a-c]{1,2}", 0..30)) {
        let mut history = SearchHistory::load(MemoryStore::new());
        for query in &pushes {
            history.push(query);
            prop_assert_eq!(history.entries().first(), Some(query));
        }
        let entries = history.entries();
        prop_assert!(entries.len() <= MAX_HISTORY_ENTRIES);
        for (idx, entry) in entries.iter().enumerate() {
            prop_assert!(!entries[idx + 1..].contains(entry));
        }
    }
}
