use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderName, Request, Response},
    routing::get,
    Router,
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{field::Empty, Span};

pub fn request_id_header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

async fn health() -> &'static str {
    "ok"
}

/// Wrap the module routes with the server middleware.
///
/// Outermost to innermost: PropagateRequestId -> SetRequestId -> Trace -> Timeout.
pub fn app(routes: Router, timeout: Duration) -> Router {
    let header = request_id_header();

    let trace = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            let rid = req
                .headers()
                .get(request_id_header())
                .and_then(|v| v.to_str().ok())
                .unwrap_or("n/a");
            tracing::info_span!(
                "http_request",
                method = %req.method(),
                uri = %req.uri().path(),
                request_id = %rid,
                status = Empty,
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, span: &Span| {
            span.record("status", res.status().as_u16());
            tracing::debug!(latency_ms = latency.as_millis() as u64, "response sent");
        });

    let mut router = routes.route("/health", get(health));
    if !timeout.is_zero() {
        router = router.layer(TimeoutLayer::new(timeout));
    }
    router
        .layer(trace)
        .layer(SetRequestIdLayer::new(header.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(header))
}
