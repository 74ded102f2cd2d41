use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use fleet_shared::{
    contact::ContactLinks,
    fleet_api::{
        BlogCategoriesResponse, BlogListResponse, BlogTagsResponse, BodyTypesResponse,
        BrandsResponse, CarDetailResponse, CarListResponse, CollectionResponse,
        PriceRangesResponse, RecentBlogsResponse, SuggestResponse,
    },
    BlogQuery, Collection, FleetQuery, SortKey,
};

use crate::{
    markdown::render_markdown,
    models::{
        BlogDetailResponse, CollectionParams, ContactParams, ErrorResponse, SuggestParams,
    },
    state::AppState,
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

pub async fn list_cars(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Json<CarListResponse> {
    let query = FleetQuery::from_query_str(raw.as_deref().unwrap_or_default());
    let response = state.store().list_cars(&query);
    if response.listing.page().is_some_and(|page| page.page_reset) {
        tracing::debug!("page {} out of range, served page 1", query.page);
    }
    Json(response)
}

pub async fn get_car(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<CarDetailResponse> {
    state
        .store()
        .car_detail(&slug)
        .map(Json)
        .ok_or_else(|| not_found(format!("Car not found: {slug}")))
}

pub async fn list_brands(State(state): State<AppState>) -> Json<BrandsResponse> {
    Json(state.store().list_brands())
}

pub async fn list_body_types(State(state): State<AppState>) -> Json<BodyTypesResponse> {
    Json(state.store().list_body_types())
}

pub async fn list_price_ranges(State(state): State<AppState>) -> Json<PriceRangesResponse> {
    Json(state.store().price_ranges())
}

pub async fn get_collection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<CollectionParams>,
) -> ApiResult<CollectionResponse> {
    let collection = id
        .parse::<Collection>()
        .map_err(|err| not_found(err.to_string()))?;
    let page = params
        .page
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(1);
    let sort = params
        .sort
        .and_then(|raw| raw.trim().parse::<SortKey>().ok())
        .unwrap_or_default();
    Ok(Json(state.store().list_collection(collection, sort, page)))
}

pub async fn suggest(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Json<SuggestResponse> {
    Json(state.store().suggest(&params.q))
}

pub async fn list_blogs(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Json<BlogListResponse> {
    let query = BlogQuery::from_query_str(raw.as_deref().unwrap_or_default());
    Json(state.store().list_posts(&query))
}

pub async fn recent_blogs(State(state): State<AppState>) -> Json<RecentBlogsResponse> {
    Json(RecentBlogsResponse {
        posts: state.store().recent_posts(),
    })
}

pub async fn get_blog(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<BlogDetailResponse> {
    let detail = state
        .store()
        .get_post(&slug)
        .ok_or_else(|| not_found(format!("Post not found: {slug}")))?;
    Ok(Json(BlogDetailResponse {
        content_html: render_markdown(&detail.post.content),
        post: detail.post,
        related: detail.related,
    }))
}

pub async fn list_blog_categories(State(state): State<AppState>) -> Json<BlogCategoriesResponse> {
    Json(state.store().blog_categories())
}

pub async fn list_blog_tags(State(state): State<AppState>) -> Json<BlogTagsResponse> {
    Json(state.store().blog_tags())
}

pub async fn contact(
    State(state): State<AppState>,
    Query(params): Query<ContactParams>,
) -> ApiResult<ContactLinks> {
    let from = parse_date("from", params.from.as_deref())?;
    let to = parse_date("to", params.to.as_deref())?;
    let car = params.car.as_deref().filter(|slug| !slug.is_empty());
    Ok(Json(state.store().contact(car, from, to)))
}

fn parse_date(
    field: &str,
    raw: Option<&str>,
) -> Result<Option<NaiveDate>, (StatusCode, Json<ErrorResponse>)> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| bad_request(format!("`{field}` must be a YYYY-MM-DD date"))),
    }
}

fn not_found(message: String) -> (StatusCode, Json<ErrorResponse>) {
    tracing::debug!("{}", message);
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: message,
            code: 404,
        }),
    )
}

fn bad_request(message: String) -> (StatusCode, Json<ErrorResponse>) {
    tracing::warn!("{}", message);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message,
            code: 400,
        }),
    )
}
