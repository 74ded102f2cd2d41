use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::Request,
    http::{header::HeaderName, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const TRACE_ID_HEADER: &str = "x-trace-id";

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Correlation ids of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

impl RequestIds {
    /// Reuses caller-supplied ids, generating the missing ones.
    fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            request_id: header_id(headers, REQUEST_ID_HEADER).unwrap_or_else(|| generate_id("req")),
            trace_id: header_id(headers, TRACE_ID_HEADER).unwrap_or_else(|| generate_id("trace")),
        }
    }
}

pub async fn request_context_middleware(request: Request, next: Next) -> Response {
    let ids = RequestIds::from_headers(request.headers());
    let started_at = Instant::now();

    let span = tracing::info_span!(
        "http_request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %request.method(),
        path = %request.uri().path(),
        query = request.uri().query().unwrap_or_default(),
    );

    let mut response = next.run(request).instrument(span.clone()).await;

    let headers = response.headers_mut();
    set_header(headers, REQUEST_ID_HEADER, &ids.request_id);
    set_header(headers, TRACE_ID_HEADER, &ids.trace_id);

    tracing::info!(
        parent: &span,
        status = response.status().as_u16(),
        elapsed_ms = started_at.elapsed().as_millis(),
        "request completed"
    );

    response
}

fn header_id(headers: &HeaderMap, name: &'static str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

fn generate_id(prefix: &str) -> String {
    let now_ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_nanos())
        .unwrap_or_default();
    let counter = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{now_ns:032x}-{counter:016x}")
}

fn set_header(headers: &mut HeaderMap, name: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(HeaderName::from_static(name), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_supplied_ids_and_generates_missing_ones() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  req-abc "));
        let ids = RequestIds::from_headers(&headers);
        assert_eq!(ids.request_id, "req-abc");
        assert!(ids.trace_id.starts_with("trace-"));
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(generate_id("req"), generate_id("req"));
    }
}
