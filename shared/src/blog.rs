use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::taxonomy::id_table;

id_table! {
    /// Blog section.
    BlogCategory, "blog category" {
        CarRental => ("car-rental", "Car Rental"),
        DubaiGuide => ("dubai-guide", "Dubai Guide"),
        DrivingTips => ("driving-tips", "Driving Tips"),
        LuxuryLifestyle => ("luxury-lifestyle", "Luxury Lifestyle"),
        Travel => ("travel", "Travel"),
        Uncategorized => ("uncategorized", "Uncategorized"),
    }
}

/// Full blog post, markdown body included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Markdown text.
    pub content: String,
    #[serde(default)]
    pub featured_image: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
    /// Display label such as `"5 min read"`.
    pub reading_time: String,
    pub category: BlogCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
}

// Listing row, without the body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogListItem {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub featured_image: String,
    pub published_at: DateTime<Utc>,
    pub reading_time: String,
    pub category: BlogCategory,
    pub category_label: String,
    pub tags: Vec<String>,
    pub author: Option<String>,
}

impl From<&BlogPost> for BlogListItem {
    fn from(post: &BlogPost) -> Self {
        BlogListItem {
            id: post.id.clone(),
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            featured_image: post.featured_image.clone(),
            published_at: post.published_at,
            reading_time: post.reading_time.clone(),
            category: post.category,
            category_label: post.category.label().to_string(),
            tags: post.tags.clone(),
            author: post.author.clone(),
        }
    }
}

/// Reading-time label from a word count at 200 words per minute,
/// rounded up, never below one minute.
pub fn reading_time_label(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(200).max(1);
    format!("{minutes} min read")
}
