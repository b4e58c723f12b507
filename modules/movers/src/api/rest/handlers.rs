use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query},
    http::{HeaderMap, Uri},
    response::Json,
    Extension,
};
use modkit::api::{bad_request, request_id, ProblemResponse};
use tracing::{debug, info};

use crate::api::rest::dto::{
    EstimateRequestPageDto, ListMoversQuery, MoverPageDto, PageQuery,
};
use crate::api::rest::error::domain_error_to_problem;
use crate::domain::service::Service;

type ApiResult<T> = Result<Json<T>, ProblemResponse>;

/// Unparseable query strings (e.g. `take=abc`) become Problem responses too.
fn query_or_problem<T>(
    query: Result<Query<T>, QueryRejection>,
    uri: &Uri,
    headers: &HeaderMap,
) -> Result<T, ProblemResponse> {
    query.map(|Query(q)| q).map_err(|rejection| {
        debug!(error = %rejection, "malformed query string");
        let ProblemResponse(p) = bad_request(rejection.body_text());
        p.with_code("INVALID_QUERY")
            .with_instance(uri.path())
            .with_request_id(request_id(headers))
            .into()
    })
}

/// List movers, optionally filtered by service type / region
pub async fn list_movers(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    headers: HeaderMap,
    query: Result<Query<ListMoversQuery>, QueryRejection>,
) -> ApiResult<MoverPageDto> {
    let query = query_or_problem(query, &uri, &headers)?;
    info!(order = ?query.order, "Listing movers");

    svc.list_movers(query.into())
        .await
        .map(|page| Json(MoverPageDto::from(page)))
        .map_err(|e| domain_error_to_problem(&e, uri.path(), request_id(&headers)))
}

/// List movers one customer liked
pub async fn list_liked_movers(
    Extension(svc): Extension<Arc<Service>>,
    Path(customer_id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<MoverPageDto> {
    let query = query_or_problem(query, &uri, &headers)?;
    info!(%customer_id, order = ?query.order, "Listing liked movers");

    svc.list_liked_movers(&customer_id, query.into())
        .await
        .map(|page| Json(MoverPageDto::from(page)))
        .map_err(|e| domain_error_to_problem(&e, uri.path(), request_id(&headers)))
}

/// List pending estimate requests
pub async fn list_open_requests(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    headers: HeaderMap,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<EstimateRequestPageDto> {
    let query = query_or_problem(query, &uri, &headers)?;
    info!(order = ?query.order, "Listing open estimate requests");

    svc.list_open_requests(query.into())
        .await
        .map(|page| Json(EstimateRequestPageDto::from(page)))
        .map_err(|e| domain_error_to_problem(&e, uri.path(), request_id(&headers)))
}
