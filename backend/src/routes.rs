use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, request_context::request_context_middleware, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/cars", get(handlers::list_cars))
        .route("/api/cars/:slug", get(handlers::get_car))
        .route("/api/brands", get(handlers::list_brands))
        .route("/api/body-types", get(handlers::list_body_types))
        .route("/api/price-ranges", get(handlers::list_price_ranges))
        .route("/api/collections/:id", get(handlers::get_collection))
        .route("/api/suggest", get(handlers::suggest))
        .route("/api/blogs", get(handlers::list_blogs))
        .route("/api/blogs/recent", get(handlers::recent_blogs))
        .route("/api/blogs/:slug", get(handlers::get_blog))
        .route("/api/blog-categories", get(handlers::list_blog_categories))
        .route("/api/blog-tags", get(handlers::list_blog_tags))
        .route("/api/contact", get(handlers::contact))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_context_middleware))
        .layer(cors)
}
