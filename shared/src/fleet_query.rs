//! Catalog view state and its query-string mapping.
//!
//! `FleetQuery` is the single serializable state of the fleet view.
//! [`FleetQuery::from_query_str`] and [`FleetQuery::to_query_string`] are
//! the two directions of the URL mapping; transitions return a new state
//! instead of mutating shared params.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::{
    listing::{FleetFilter, SortKey},
    taxonomy::{BodyType, Brand, PriceRange},
};

pub const PARAM_CATEGORY: &str = "category";
pub const PARAM_BRAND: &str = "brand";
pub const PARAM_PRICE: &str = "price";
pub const PARAM_SEARCH: &str = "search";
pub const PARAM_SORT: &str = "sort";
pub const PARAM_PAGE: &str = "page";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetQuery {
    #[serde(flatten)]
    pub filter: FleetFilter,
    #[serde(default)]
    pub sort: SortKey,
    /// 1-based requested page.
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

impl Default for FleetQuery {
    fn default() -> Self {
        Self {
            filter: FleetFilter::default(),
            sort: SortKey::default(),
            page: first_page(),
        }
    }
}

impl FleetQuery {
    /// Reads the catalog state from a query string (leading `?` allowed).
    ///
    /// Lenient: unknown ids and malformed pages are ignored, the first
    /// occurrence of a repeated key wins, blank search reads as none.
    pub fn from_query_str(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut query = Self::default();
        let mut seen: Vec<String> = Vec::new();

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            if seen.iter().any(|existing| existing.as_str() == &*key) {
                continue;
            }
            seen.push(key.to_string());

            match &*key {
                PARAM_CATEGORY => query.filter.category = parse_id::<BodyType>(&key, &value),
                PARAM_BRAND => query.filter.brand = parse_id::<Brand>(&key, &value),
                PARAM_PRICE => query.filter.price = parse_id::<PriceRange>(&key, &value),
                PARAM_SEARCH => query.filter.search = normalize_search(&value),
                PARAM_SORT => query.sort = parse_id::<SortKey>(&key, &value).unwrap_or_default(),
                PARAM_PAGE => query.page = parse_page(&value),
                _ => {},
            }
        }
        query
    }

    /// Writes the state back; defaults (no filter, featured sort, page 1)
    /// are omitted so the canonical form of the default view is `""`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(category) = self.filter.category {
            serializer.append_pair(PARAM_CATEGORY, category.id());
        }
        if let Some(brand) = self.filter.brand {
            serializer.append_pair(PARAM_BRAND, brand.id());
        }
        if let Some(price) = self.filter.price {
            serializer.append_pair(PARAM_PRICE, price.id());
        }
        if let Some(search) = &self.filter.search {
            serializer.append_pair(PARAM_SEARCH, search);
        }
        if self.sort != SortKey::default() {
            serializer.append_pair(PARAM_SORT, self.sort.id());
        }
        if self.page > 1 {
            serializer.append_pair(PARAM_PAGE, &self.page.to_string());
        }
        serializer.finish()
    }

    /// `/fleet` path with the query string attached when non-empty.
    pub fn to_href(&self, base: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            base.to_string()
        } else {
            format!("{base}?{query}")
        }
    }

    pub fn has_filters(&self) -> bool {
        self.filter.has_filters()
    }

    pub fn with_category(&self, category: Option<BodyType>) -> Self {
        let mut next = self.clone();
        next.filter.category = category;
        next
    }

    pub fn with_brand(&self, brand: Option<Brand>) -> Self {
        let mut next = self.clone();
        next.filter.brand = brand;
        next
    }

    pub fn with_price(&self, price: Option<PriceRange>) -> Self {
        let mut next = self.clone();
        next.filter.price = price;
        next
    }

    pub fn with_search(&self, search: Option<&str>) -> Self {
        let mut next = self.clone();
        next.filter.search = search.and_then(normalize_search);
        next
    }

    pub fn with_sort(&self, sort: SortKey) -> Self {
        let mut next = self.clone();
        next.sort = sort;
        next
    }

    /// Page 1 drops the `page` param when written back.
    pub fn with_page(&self, page: usize) -> Self {
        let mut next = self.clone();
        next.page = page.max(1);
        next
    }
}

fn parse_id<T>(key: &str, value: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            if !value.is_empty() {
                tracing::debug!("ignoring `{}` filter: {}", key, err);
            }
            None
        },
    }
}

fn parse_page(value: &str) -> usize {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

fn normalize_search(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
