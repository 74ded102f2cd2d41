//! Static lookup tables keyed by string id: brands, body types, price
//! buckets and the marketing collections shown on the fleet pages.
//!
//! Every table is a closed enum, so filters dispatch with an exhaustive
//! `match` and unknown ids are rejected at the parsing boundary.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::vehicle::Car;

/// Raised when a string id has no entry in its lookup table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} id: {id}")]
pub struct UnknownIdError {
    /// Table the id was looked up in.
    pub kind: &'static str,
    /// The rejected id.
    pub id: String,
}

/// Declares a closed id table: the enum, its serde ids, display labels,
/// `ALL`, `FromStr` and `Display`.
macro_rules! id_table {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => ($id:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $id)]
                $variant,
            )+
        }

        impl $name {
            /// Every entry, in table order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stable string id used in URLs and data files.
            pub fn id(self) -> &'static str {
                match self {
                    $($name::$variant => $id,)+
                }
            }

            /// Human-facing label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = $crate::taxonomy::UnknownIdError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|entry| entry.id() == raw)
                    .ok_or_else(|| $crate::taxonomy::UnknownIdError {
                        kind: $kind,
                        id: raw.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.id())
            }
        }
    };
}

pub(crate) use id_table;

id_table! {
    /// Vehicle manufacturer.
    Brand, "brand" {
        RollsRoyce => ("rolls-royce", "Rolls-Royce"),
        Lamborghini => ("lamborghini", "Lamborghini"),
        Ferrari => ("ferrari", "Ferrari"),
        Bentley => ("bentley", "Bentley"),
        Mercedes => ("mercedes", "Mercedes-Benz"),
        Bmw => ("bmw", "BMW"),
        Porsche => ("porsche", "Porsche"),
        RangeRover => ("range-rover", "Range Rover"),
        Audi => ("audi", "Audi"),
        Mclaren => ("mclaren", "McLaren"),
        AstonMartin => ("aston-martin", "Aston Martin"),
        Chevrolet => ("chevrolet", "Chevrolet"),
        Cadillac => ("cadillac", "Cadillac"),
        Mini => ("mini", "MINI"),
        Gmc => ("gmc", "GMC"),
        Nissan => ("nissan", "Nissan"),
        Maserati => ("maserati", "Maserati"),
    }
}

id_table! {
    /// Body type, the `category` field of a vehicle.
    BodyType, "body type" {
        Supercar => ("supercar", "Supercars"),
        LuxurySedan => ("luxury-sedan", "Sedans"),
        Suv => ("suv", "SUVs"),
        Sports => ("sports", "Sports Cars"),
        Convertible => ("convertible", "Convertibles"),
        Coupe => ("coupe", "Coupes"),
    }
}

id_table! {
    /// Named daily-rate bucket used by the `price` filter.
    PriceRange, "price range" {
        Budget => ("budget", "250 - 500 AED"),
        Mid => ("mid", "500 - 1,000 AED"),
        Premium => ("premium", "1,000 - 2,500 AED"),
        Ultra => ("ultra", "2,500 - 5,000 AED"),
        Exotic => ("exotic", "5,000+ AED"),
    }
}

impl PriceRange {
    /// Inclusive `(min, max)` daily bounds; `None` means unbounded.
    pub fn bounds(self) -> (u32, Option<u32>) {
        match self {
            PriceRange::Budget => (250, Some(500)),
            PriceRange::Mid => (500, Some(1_000)),
            PriceRange::Premium => (1_000, Some(2_500)),
            PriceRange::Ultra => (2_500, Some(5_000)),
            PriceRange::Exotic => (5_000, None),
        }
    }

    /// Whether a daily rate falls inside the bucket, bounds included.
    pub fn contains(self, daily: u32) -> bool {
        let (min, max) = self.bounds();
        daily >= min && max.map_or(true, |max| daily <= max)
    }
}

id_table! {
    /// Marketing collection pages (`/fleet/category/<id>`).
    Collection, "collection" {
        Luxury => ("luxury", "Luxury"),
        Business => ("business", "Business"),
        Economy => ("economy", "Economy"),
        Popular => ("popular", "Popular"),
        NewArrivals => ("new-arrivals", "New Arrivals"),
        SpecialOffers => ("special-offers", "Special Offers"),
    }
}

impl Collection {
    /// Membership rule over the daily rate, body type, year and flags.
    ///
    /// Availability is not checked here; collections are always built
    /// from the available fleet.
    pub fn matches(self, car: &Car) -> bool {
        let daily = car.pricing.daily;
        match self {
            Collection::Luxury => daily >= 2_000,
            Collection::Business => {
                car.category == BodyType::LuxurySedan || (500..2_000).contains(&daily)
            },
            Collection::Economy => daily < 500,
            Collection::Popular | Collection::SpecialOffers => car.is_featured,
            Collection::NewArrivals => car.year >= 2024,
        }
    }
}
