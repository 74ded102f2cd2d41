//! Blog listing filters and the related-post/category/tag helpers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::{
    blog::{BlogCategory, BlogListItem, BlogPost},
    pagination::{paginate, Listing},
};

pub const POSTS_PER_PAGE: usize = 12;
pub const RELATED_POSTS_LIMIT: usize = 4;
pub const RECENT_POSTS_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogQuery {
    #[serde(default)]
    pub category: Option<BlogCategory>,
    /// Exact tag, compared case-insensitively.
    #[serde(default)]
    pub tag: Option<String>,
    /// Substring of the title, excerpt or any tag.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

impl Default for BlogQuery {
    fn default() -> Self {
        Self {
            category: None,
            tag: None,
            search: None,
            page: first_page(),
        }
    }
}

impl BlogQuery {
    /// Lenient like the fleet query: unknown categories and bad pages are
    /// ignored.
    pub fn from_query_str(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut query = Self::default();
        let mut page_seen = false;
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match &*key {
                "category" if query.category.is_none() => query.category = value.parse().ok(),
                "tag" if query.tag.is_none() => query.tag = non_blank(&value),
                "search" if query.search.is_none() => query.search = non_blank(&value),
                "page" if !page_seen => {
                    page_seen = true;
                    query.page = value.trim().parse().ok().filter(|page| *page >= 1).unwrap_or(1)
                },
                _ => {},
            }
        }
        query
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(category) = self.category {
            serializer.append_pair("category", category.id());
        }
        if let Some(tag) = &self.tag {
            serializer.append_pair("tag", tag);
        }
        if let Some(search) = &self.search {
            serializer.append_pair("search", search);
        }
        if self.page > 1 {
            serializer.append_pair("page", &self.page.to_string());
        }
        serializer.finish()
    }

    pub fn matches(&self, post: &BlogPost) -> bool {
        self.category.map_or(true, |category| post.category == category)
            && self.tag.as_deref().map_or(true, |tag| has_tag(post, tag))
            && self
                .search
                .as_deref()
                .map_or(true, |search| matches_search(post, &search.to_lowercase()))
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn has_tag(post: &BlogPost, tag: &str) -> bool {
    let tag = tag.to_lowercase();
    post.tags.iter().any(|candidate| candidate.to_lowercase() == tag)
}

fn matches_search(post: &BlogPost, needle_lower: &str) -> bool {
    post.title.to_lowercase().contains(needle_lower)
        || post.excerpt.to_lowercase().contains(needle_lower)
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(needle_lower))
}

/// Newest first; equal timestamps keep authoring order.
pub fn newest_first(posts: &[BlogPost]) -> Vec<&BlogPost> {
    let mut sorted: Vec<&BlogPost> = posts.iter().collect();
    sorted.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    sorted
}

pub fn filter_posts<'a>(posts: &'a [BlogPost], query: &BlogQuery) -> Vec<&'a BlogPost> {
    newest_first(posts)
        .into_iter()
        .filter(|post| query.matches(post))
        .collect()
}

pub fn run_blog_query(posts: &[BlogPost], query: &BlogQuery) -> Listing<BlogListItem> {
    paginate(&filter_posts(posts, query), query.page, POSTS_PER_PAGE).map(BlogListItem::from)
}

pub fn recent_posts(posts: &[BlogPost], limit: usize) -> Vec<&BlogPost> {
    let mut recent = newest_first(posts);
    recent.truncate(limit);
    recent
}

/// Same category first, then posts sharing a tag, then anything else;
/// never the post itself.
pub fn related_posts<'a>(posts: &'a [BlogPost], current: &BlogPost, limit: usize) -> Vec<&'a BlogPost> {
    let others = move || posts.iter().filter(move |post| post.id != current.id);

    let mut related: Vec<&BlogPost> = others().filter(|post| post.category == current.category).collect();
    related.extend(others().filter(|post| {
        post.category != current.category && post.tags.iter().any(|tag| current.tags.contains(tag))
    }));
    let mut rest: Vec<&BlogPost> = others()
        .filter(|post| !related.iter().any(|picked| picked.id == post.id))
        .collect();
    related.append(&mut rest);
    related.truncate(limit);
    related
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub id: BlogCategory,
    pub name: String,
    pub count: usize,
}

/// Categories in use, by post count descending (ties in first-seen order).
pub fn categories_with_counts(posts: &[BlogPost]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for post in posts {
        match counts.iter_mut().find(|entry| entry.id == post.category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                id: post.category,
                name: post.category.label().to_string(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Distinct tags, sorted.
pub fn all_tags(posts: &[BlogPost]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|post| post.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::fixtures::post;

    fn posts() -> Vec<BlogPost> {
        vec![
            post("dubai-night-drives", BlogCategory::DubaiGuide, &["Dubai", "Night"], 3),
            post("supercar-etiquette", BlogCategory::DrivingTips, &["Supercar", "Etiquette"], 10),
            post("rent-a-lambo", BlogCategory::CarRental, &["Supercar", "Lamborghini"], 7),
            post("desert-roads", BlogCategory::DubaiGuide, &["Desert"], 1),
            post("weekend-in-hatta", BlogCategory::Travel, &["Weekend"], 5),
        ]
    }

    fn slugs(posts: &[&BlogPost]) -> Vec<String> {
        posts.iter().map(|post| post.slug.clone()).collect()
    }

    #[test]
    fn filters_newest_first() {
        let posts = posts();
        assert_eq!(
            slugs(&filter_posts(&posts, &BlogQuery::default())),
            vec![
                "supercar-etiquette",
                "rent-a-lambo",
                "weekend-in-hatta",
                "dubai-night-drives",
                "desert-roads"
            ]
        );

        let query = BlogQuery::from_query_str("category=dubai-guide");
        assert_eq!(slugs(&filter_posts(&posts, &query)), vec!["dubai-night-drives", "desert-roads"]);
    }

    #[test]
    fn tag_is_exact_but_case_insensitive() {
        let posts = posts();
        let query = BlogQuery::from_query_str("tag=supercar");
        assert_eq!(slugs(&filter_posts(&posts, &query)), vec!["supercar-etiquette", "rent-a-lambo"]);

        let query = BlogQuery::from_query_str("tag=super");
        assert!(filter_posts(&posts, &query).is_empty());
    }

    #[test]
    fn tag_match_folds_non_ascii_case() {
        let posts = vec![post("road-trip", BlogCategory::Travel, &["ÉMIRATS"], 2)];
        let query = BlogQuery::from_query_str("tag=%C3%A9mirats");
        assert_eq!(slugs(&filter_posts(&posts, &query)), vec!["road-trip"]);
    }

    #[test]
    fn first_page_param_wins() {
        assert_eq!(BlogQuery::from_query_str("page=2&page=5").page, 2);
        assert_eq!(BlogQuery::from_query_str("page=x&page=5").page, 1);
    }

    #[test]
    fn search_covers_title_excerpt_and_tags() {
        let posts = posts();
        let query = BlogQuery::from_query_str("search=LAMBORGHINI");
        assert_eq!(slugs(&filter_posts(&posts, &query)), vec!["rent-a-lambo"]);

        let query = BlogQuery::from_query_str("search=about%20desert");
        assert_eq!(slugs(&filter_posts(&posts, &query)), vec!["desert-roads"]);
    }

    #[test]
    fn related_prefers_category_then_tags_then_rest() {
        let posts = posts();
        let related = related_posts(&posts, &posts[1], RELATED_POSTS_LIMIT);
        assert_eq!(
            slugs(&related),
            vec!["rent-a-lambo", "dubai-night-drives", "desert-roads", "weekend-in-hatta"]
        );

        let related = related_posts(&posts, &posts[0], 2);
        assert_eq!(slugs(&related), vec!["desert-roads", "supercar-etiquette"]);
    }

    #[test]
    fn category_counts_sorted_descending() {
        let counts = categories_with_counts(&posts());
        assert_eq!(counts[0].id, BlogCategory::DubaiGuide);
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[0].name, "Dubai Guide");
        assert_eq!(counts.len(), 4);
    }

    #[test]
    fn tags_are_distinct_and_sorted() {
        assert_eq!(
            all_tags(&posts()),
            vec!["Desert", "Dubai", "Etiquette", "Lamborghini", "Night", "Supercar", "Weekend"]
        );
    }

    #[test]
    fn blog_query_string_round_trips() {
        let query = BlogQuery::from_query_str("?category=travel&tag=Weekend&search=hatta&page=2&category=bogus");
        assert_eq!(query.category, Some(BlogCategory::Travel));
        assert_eq!(query.to_query_string(), "category=travel&tag=Weekend&search=hatta&page=2");
        assert_eq!(BlogQuery::from_query_str("category=bogus").category, None);
    }

    #[test]
    fn recent_posts_are_capped() {
        let posts = posts();
        assert_eq!(slugs(&recent_posts(&posts, 2)), vec!["supercar-etiquette", "rent-a-lambo"]);
    }
}
