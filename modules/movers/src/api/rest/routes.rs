use std::sync::Arc;

use axum::{response::Json, routing::get, Extension, Router};
use modkit::api::{GetOperation, OpenApiDoc};

use crate::api::rest::{dto, handlers};
use crate::domain::service::Service;

pub const OPENAPI_PATH: &str = "/openapi.json";

const ORDER_HELP: &str = "Sort order, e.g. `experience DESC` or `review_count DESC`";
const CURSOR_HELP: &str = "Opaque cursor from a previous page's `nextCursor`";
const TAKE_HELP: &str = "Page size (default 5, max 50)";

fn paged(op: GetOperation) -> GetOperation {
    op.query_param("order", true, ORDER_HELP)
        .query_param("cursor", false, CURSOR_HELP)
        .query_param("take", false, TAKE_HELP)
}

/// Document the listing operations in `doc`.
pub fn describe(doc: &mut OpenApiDoc) {
    let mover_page = doc.ensure_schema::<dto::MoverPageDto>();
    let request_page = doc.ensure_schema::<dto::EstimateRequestPageDto>();

    doc.add(
        paged(GetOperation::new("/movers", "movers.list_movers"))
            .summary("List movers with their statistics")
            .tag("movers")
            .query_param("serviceType", false, "Comma-separated service types, any match")
            .query_param("serviceRegion", false, "Comma-separated regions, any match")
            .json_response(mover_page.clone()),
    )
    .add(
        paged(
            GetOperation::new(
                "/customers/{customer_id}/liked-movers",
                "movers.list_liked_movers",
            )
            .path_param("customer_id", "Customer id"),
        )
        .summary("List movers a customer liked")
        .tag("movers")
        .json_response(mover_page),
    )
    .add(
        paged(GetOperation::new("/estimate-requests", "movers.list_open_requests"))
            .summary("List pending estimate requests")
            .tag("estimate-requests")
            .json_response(request_page),
    );
}

pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let mut doc = OpenApiDoc::new("Mover Marketplace API", env!("CARGO_PKG_VERSION"));
    describe(&mut doc);
    let openapi = Arc::new(doc.build());

    router
        .route("/movers", get(handlers::list_movers))
        .route(
            "/customers/{customer_id}/liked-movers",
            get(handlers::list_liked_movers),
        )
        .route("/estimate-requests", get(handlers::list_open_requests))
        .route(
            OPENAPI_PATH,
            get(move || {
                let openapi = openapi.clone();
                async move { Json(openapi.as_ref().clone()) }
            }),
        )
        .layer(Extension(service))
}
