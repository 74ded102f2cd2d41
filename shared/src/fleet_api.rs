use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    blog::{BlogListItem, BlogPost},
    blog_query::{
        all_tags, categories_with_counts, recent_posts, related_posts, run_blog_query, BlogQuery,
        CategoryCount, RECENT_POSTS_LIMIT, RELATED_POSTS_LIMIT,
    },
    contact::{contact_links, ContactLinks},
    fleet_query::FleetQuery,
    listing::{
        collection_cars, run_fleet_query, similar_cars, SortKey, CARS_PER_PAGE, SIMILAR_CARS_LIMIT,
    },
    pagination::{paginate, Listing},
    suggest::{is_suggest_query, popular_searches, suggest, Suggestion},
    taxonomy::{BodyType, Brand, Collection, PriceRange},
    vehicle::{Car, CarListItem},
};

const BUNDLED_CARS: &str = include_str!("../data/cars.json");
const BUNDLED_BLOGS: &str = include_str!("../data/blogs.json");

#[derive(Debug, Serialize, Clone)]
pub struct CarListResponse {
    #[serde(flatten)]
    pub listing: Listing<CarListItem>,
    pub query: FleetQuery,
    /// Query string to show for the served page (differs from the request
    /// when the page was reset).
    pub canonical_query: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct CarDetailResponse {
    pub car: Car,
    pub similar: Vec<CarListItem>,
    pub contact: ContactLinks,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BrandInfo {
    pub id: Brand,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BrandsResponse {
    pub brands: Vec<BrandInfo>,
    pub total_available: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BodyTypeInfo {
    pub id: BodyType,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BodyTypesResponse {
    pub body_types: Vec<BodyTypeInfo>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PriceRangeInfo {
    pub id: PriceRange,
    pub label: String,
    pub min: u32,
    pub max: Option<u32>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PriceRangesResponse {
    pub price_ranges: Vec<PriceRangeInfo>,
}

#[derive(Debug, Serialize, Clone)]
pub struct CollectionResponse {
    pub collection: Collection,
    pub name: String,
    pub sort: SortKey,
    #[serde(flatten)]
    pub listing: Listing<CarListItem>,
}

/// Suggestions for a long enough query, the popular view otherwise.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum SuggestResponse {
    Suggestions {
        query: String,
        suggestions: Vec<Suggestion>,
    },
    Popular {
        query: String,
        popular: Vec<String>,
    },
}

#[derive(Debug, Serialize, Clone)]
pub struct BlogListResponse {
    #[serde(flatten)]
    pub listing: Listing<BlogListItem>,
    pub query: BlogQuery,
}

#[derive(Debug, Serialize, Clone)]
pub struct BlogDetail {
    pub post: BlogPost,
    pub related: Vec<BlogListItem>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BlogCategoriesResponse {
    pub categories: Vec<CategoryCount>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BlogTagsResponse {
    pub tags: Vec<String>,
}

/// Newest posts for the sidebar.
#[derive(Debug, Serialize, Clone)]
pub struct RecentBlogsResponse {
    pub posts: Vec<BlogListItem>,
}

/// In-memory catalog shared by the HTTP handlers and the CLI.
#[derive(Debug, Clone)]
pub struct FleetDataStore {
    cars: Vec<Car>,
    posts: Vec<BlogPost>,
}

impl FleetDataStore {
    /// Fleet and blog data compiled into the crate.
    pub fn bundled() -> Result<Self> {
        let cars: Vec<Car> =
            serde_json::from_str(BUNDLED_CARS).context("failed to parse bundled fleet data")?;
        let posts: Vec<BlogPost> =
            serde_json::from_str(BUNDLED_BLOGS).context("failed to parse bundled blog data")?;
        Ok(Self::from_parts(cars, posts))
    }

    /// Duplicate slugs are logged; the first entry wins lookups.
    pub fn from_parts(cars: Vec<Car>, posts: Vec<BlogPost>) -> Self {
        warn_duplicate_slugs("car", cars.iter().map(|car| car.slug.as_str()));
        warn_duplicate_slugs("blog post", posts.iter().map(|post| post.slug.as_str()));
        Self {
            cars,
            posts,
        }
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn available_count(&self) -> usize {
        self.cars.iter().filter(|car| car.is_available).count()
    }

    pub fn list_cars(&self, query: &FleetQuery) -> CarListResponse {
        let listing = run_fleet_query(&self.cars, query);
        let effective_page = listing.page().map_or(1, |page| page.page);
        CarListResponse {
            canonical_query: query.with_page(effective_page).to_query_string(),
            listing,
            query: query.clone(),
        }
    }

    pub fn get_car(&self, slug: &str) -> Option<&Car> {
        self.cars.iter().find(|car| car.slug == slug)
    }

    pub fn similar(&self, car: &Car) -> Vec<CarListItem> {
        similar_cars(&self.cars, car, SIMILAR_CARS_LIMIT)
            .into_iter()
            .map(CarListItem::from)
            .collect()
    }

    pub fn car_detail(&self, slug: &str) -> Option<CarDetailResponse> {
        let car = self.get_car(slug)?;
        Some(CarDetailResponse {
            car: car.clone(),
            similar: self.similar(car),
            contact: contact_links(Some(car), None, None),
        })
    }

    /// Brands with at least one available car, most cars first.
    pub fn list_brands(&self) -> BrandsResponse {
        let mut brands: Vec<BrandInfo> = Brand::ALL
            .iter()
            .map(|brand| BrandInfo {
                id: *brand,
                name: brand.label().to_string(),
                count: self.count_available(|car| car.brand == *brand),
            })
            .filter(|info| info.count > 0)
            .collect();
        brands.sort_by(|a, b| b.count.cmp(&a.count));
        BrandsResponse {
            brands,
            total_available: self.available_count(),
        }
    }

    pub fn list_body_types(&self) -> BodyTypesResponse {
        BodyTypesResponse {
            body_types: BodyType::ALL
                .iter()
                .map(|body_type| BodyTypeInfo {
                    id: *body_type,
                    name: body_type.label().to_string(),
                    count: self.count_available(|car| car.category == *body_type),
                })
                .collect(),
        }
    }

    pub fn price_ranges(&self) -> PriceRangesResponse {
        PriceRangesResponse {
            price_ranges: PriceRange::ALL
                .iter()
                .map(|range| {
                    let (min, max) = range.bounds();
                    PriceRangeInfo {
                        id: *range,
                        label: range.label().to_string(),
                        min,
                        max,
                        count: self.count_available(|car| range.contains(car.pricing.daily)),
                    }
                })
                .collect(),
        }
    }

    pub fn list_collection(
        &self,
        collection: Collection,
        sort: SortKey,
        page: usize,
    ) -> CollectionResponse {
        let cars = collection_cars(&self.cars, collection, sort);
        CollectionResponse {
            collection,
            name: collection.label().to_string(),
            sort,
            listing: paginate(&cars, page, CARS_PER_PAGE).map(CarListItem::from),
        }
    }

    pub fn suggest(&self, query: &str) -> SuggestResponse {
        if is_suggest_query(query) {
            SuggestResponse::Suggestions {
                query: query.to_string(),
                suggestions: suggest(&self.cars, query),
            }
        } else {
            SuggestResponse::Popular {
                query: query.to_string(),
                popular: popular_searches(&self.cars),
            }
        }
    }

    pub fn list_posts(&self, query: &BlogQuery) -> BlogListResponse {
        BlogListResponse {
            listing: run_blog_query(&self.posts, query),
            query: query.clone(),
        }
    }

    pub fn get_post(&self, slug: &str) -> Option<BlogDetail> {
        let post = self.posts.iter().find(|post| post.slug == slug)?;
        Some(BlogDetail {
            post: post.clone(),
            related: related_posts(&self.posts, post, RELATED_POSTS_LIMIT)
                .into_iter()
                .map(BlogListItem::from)
                .collect(),
        })
    }

    pub fn blog_categories(&self) -> BlogCategoriesResponse {
        BlogCategoriesResponse {
            categories: categories_with_counts(&self.posts),
        }
    }

    /// The newest posts, at most [`RECENT_POSTS_LIMIT`].
    pub fn recent_posts(&self) -> Vec<BlogListItem> {
        recent_posts(&self.posts, RECENT_POSTS_LIMIT)
            .into_iter()
            .map(BlogListItem::from)
            .collect()
    }

    pub fn blog_tags(&self) -> BlogTagsResponse {
        BlogTagsResponse {
            tags: all_tags(&self.posts),
        }
    }

    /// Contact links, naming the car when `car_slug` resolves.
    pub fn contact(
        &self,
        car_slug: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> ContactLinks {
        let car = car_slug.and_then(|slug| self.get_car(slug));
        if car.is_none() {
            if let Some(slug) = car_slug {
                tracing::debug!("contact link for unknown car `{}`, using generic text", slug);
            }
        }
        contact_links(car, from, to)
    }

    fn count_available(&self, predicate: impl Fn(&Car) -> bool) -> usize {
        self.cars
            .iter()
            .filter(|car| car.is_available && predicate(car))
            .count()
    }
}

fn warn_duplicate_slugs<'a>(kind: &str, slugs: impl Iterator<Item = &'a str>) {
    let mut seen = HashSet::new();
    for slug in slugs {
        if !seen.insert(slug) {
            tracing::warn!("duplicate {} slug `{}`; later entry is unreachable", kind, slug);
        }
    }
}
