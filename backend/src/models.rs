use fleet_shared::{BlogListItem, BlogPost};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

#[derive(Debug, Serialize)]
pub struct BlogDetailResponse {
    pub post: BlogPost,
    /// Markdown body rendered to HTML.
    pub content_html: String,
    pub related: Vec<BlogListItem>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct CollectionParams {
    #[serde(default)]
    pub page: Option<String>,
    /// Sort id; unknown ids fall back to featured.
    #[serde(default)]
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactParams {
    #[serde(default)]
    pub car: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}
