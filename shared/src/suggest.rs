//! Search-as-you-type suggestions over the fleet and the label tables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    taxonomy::{BodyType, Brand},
    vehicle::Car,
};

/// Shorter queries show the popular/history view instead.
pub const MIN_QUERY_CHARS: usize = 2;
pub const MAX_VEHICLE_SUGGESTIONS: usize = 6;
pub const MAX_BRAND_SUGGESTIONS: usize = 3;
pub const MAX_CATEGORY_SUGGESTIONS: usize = 2;
pub const SUGGEST_DEBOUNCE: Duration = Duration::from_millis(300);

/// Popular-search quota per body type, in display order.
const POPULAR_QUOTA: [(BodyType, usize); 4] = [
    (BodyType::Supercar, 3),
    (BodyType::Sports, 3),
    (BodyType::Convertible, 2),
    (BodyType::Suv, 1),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Suggestion {
    Vehicle {
        id: String,
        slug: String,
        text: String,
        category: BodyType,
        price: u32,
    },
    Brand {
        brand: Brand,
        text: String,
    },
    Category {
        category: BodyType,
        text: String,
    },
}

impl Suggestion {
    /// Label shown in the panel.
    pub fn text(&self) -> &str {
        match self {
            Suggestion::Vehicle {
                text, ..
            }
            | Suggestion::Brand {
                text, ..
            }
            | Suggestion::Category {
                text, ..
            } => text,
        }
    }
}

pub fn is_suggest_query(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_CHARS
}

/// Vehicles (available only, matched like the catalog free text), then
/// brand labels, then body-type labels. Empty below [`MIN_QUERY_CHARS`].
pub fn suggest(cars: &[Car], query: &str) -> Vec<Suggestion> {
    if !is_suggest_query(query) {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let vehicles = cars
        .iter()
        .filter(|car| car.is_available && car.matches_text(&needle))
        .take(MAX_VEHICLE_SUGGESTIONS)
        .map(|car| Suggestion::Vehicle {
            id: car.id.clone(),
            slug: car.slug.clone(),
            text: car.name.clone(),
            category: car.category,
            price: car.pricing.daily,
        });

    let brands = Brand::ALL
        .iter()
        .filter(|brand| brand.label().to_lowercase().contains(&needle))
        .take(MAX_BRAND_SUGGESTIONS)
        .map(|brand| Suggestion::Brand {
            brand: *brand,
            text: brand.label().to_string(),
        });

    let categories = BodyType::ALL
        .iter()
        .filter(|category| category.label().to_lowercase().contains(&needle))
        .take(MAX_CATEGORY_SUGGESTIONS)
        .map(|category| Suggestion::Category {
            category: *category,
            text: category.label().to_string(),
        });

    vehicles.chain(brands).chain(categories).collect()
}

/// Names shown under "popular searches" when the query is short.
pub fn popular_searches(cars: &[Car]) -> Vec<String> {
    POPULAR_QUOTA
        .iter()
        .flat_map(|(category, quota)| {
            cars.iter()
                .filter(move |car| car.is_available && car.category == *category)
                .take(*quota)
                .map(|car| car.name.clone())
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSegment {
    pub text: String,
    pub matched: bool,
}

/// Splits `text` into runs that do or do not match `query`
/// case-insensitively. A blank query yields the whole text unmatched.
pub fn highlight_segments(text: &str, query: &str) -> Vec<HighlightSegment> {
    let needle: Vec<char> = query.chars().collect();
    if query.trim().is_empty() {
        return vec![HighlightSegment {
            text: text.to_string(),
            matched: false,
        }];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut segments: Vec<HighlightSegment> = Vec::new();
    let mut plain = String::new();
    let mut idx = 0;
    while idx < chars.len() {
        if matches_at(&chars, idx, &needle) {
            if !plain.is_empty() {
                segments.push(HighlightSegment {
                    text: std::mem::take(&mut plain),
                    matched: false,
                });
            }
            segments.push(HighlightSegment {
                text: chars[idx..idx + needle.len()].iter().collect(),
                matched: true,
            });
            idx += needle.len();
        } else {
            plain.push(chars[idx]);
            idx += 1;
        }
    }
    if !plain.is_empty() {
        segments.push(HighlightSegment {
            text: plain,
            matched: false,
        });
    }
    segments
}

fn matches_at(chars: &[char], start: usize, needle: &[char]) -> bool {
    chars.len() - start >= needle.len()
        && chars[start..start + needle.len()]
            .iter()
            .zip(needle)
            .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::fixtures::{car, retired};

    fn fleet() -> Vec<Car> {
        vec![
            car("Ferrari SF90", Brand::Ferrari, BodyType::Supercar, 4_500, 2023, true),
            car("Ferrari Roma", Brand::Ferrari, BodyType::Sports, 3_000, 2023, false),
            retired(car("Ferrari 812", Brand::Ferrari, BodyType::Coupe, 5_000, 2022, false)),
            car("Range Rover Sport", Brand::RangeRover, BodyType::Suv, 1_500, 2024, false),
            car("Mini Cooper", Brand::Mini, BodyType::Convertible, 350, 2023, false),
        ]
    }

    fn texts(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(Suggestion::text).collect()
    }

    #[test]
    fn short_queries_compute_nothing() {
        assert!(suggest(&fleet(), "").is_empty());
        assert!(suggest(&fleet(), "f").is_empty());
    }

    #[test]
    fn vehicles_then_brands_then_categories() {
        let suggestions = suggest(&fleet(), "sp");
        assert_eq!(texts(&suggestions), vec!["Ferrari Roma", "Range Rover Sport", "Sports Cars"]);

        let suggestions = suggest(&fleet(), "FERR");
        assert_eq!(texts(&suggestions), vec!["Ferrari SF90", "Ferrari Roma", "Ferrari"]);
        assert!(matches!(
            suggestions[2],
            Suggestion::Brand {
                brand: Brand::Ferrari,
                ..
            }
        ));
    }

    #[test]
    fn caps_each_group() {
        let fleet: Vec<Car> = (0..10)
            .map(|n| car(&format!("Car {n}"), Brand::Audi, BodyType::Sports, 900, 2023, false))
            .collect();
        let vehicles = suggest(&fleet, "car")
            .into_iter()
            .filter(|s| matches!(s, Suggestion::Vehicle { .. }))
            .count();
        assert_eq!(vehicles, MAX_VEHICLE_SUGGESTIONS);

        let brands = suggest(&[], "er")
            .into_iter()
            .filter(|s| matches!(s, Suggestion::Brand { .. }))
            .count();
        assert_eq!(brands, MAX_BRAND_SUGGESTIONS);
    }

    #[test]
    fn suggestion_serializes_with_type_tag() {
        let json = serde_json::to_value(&suggest(&fleet(), "convert")[0]).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "type": "vehicle", "id": "mini-cooper", "slug": "mini-cooper",
                "text": "Mini Cooper", "category": "convertible", "price": 350 })
        );
    }

    #[test]
    fn popular_searches_follow_body_type_quota() {
        let mut fleet = fleet();
        fleet.push(car("Urus", Brand::Lamborghini, BodyType::Suv, 3_000, 2024, true));
        assert_eq!(
            popular_searches(&fleet),
            vec!["Ferrari SF90", "Ferrari Roma", "Mini Cooper", "Range Rover Sport"]
        );
    }

    #[test]
    fn highlight_splits_case_insensitively() {
        let segments = highlight_segments("Rolls-Royce Ghost", "ro");
        let rendered: Vec<(String, bool)> =
            segments.into_iter().map(|s| (s.text, s.matched)).collect();
        assert_eq!(
            rendered,
            vec![
                ("Ro".to_string(), true),
                ("lls-".to_string(), false),
                ("Ro".to_string(), true),
                ("yce Ghost".to_string(), false),
            ]
        );
    }

    #[test]
    fn highlight_with_blank_query_is_plain() {
        let segments = highlight_segments("Urus", "  ");
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].matched);
    }
}
