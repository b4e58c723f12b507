use axum::http::StatusCode;
use modkit::api::{pagination_error_to_problem, Problem, ProblemResponse};

use crate::domain::error::DomainError;

/// Map a domain failure onto a Problem Details response for `instance`.
pub fn domain_error_to_problem(
    e: &DomainError,
    instance: &str,
    request_id: Option<String>,
) -> ProblemResponse {
    let ProblemResponse(problem) = match e {
        DomainError::Pagination(err) => pagination_error_to_problem(err, instance),
        DomainError::Validation { field, message } => {
            tracing::debug!(field = %field, "movers request rejected: {message}");
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error", message.clone())
                .with_code("MOVERS_VALIDATION")
                .with_instance(instance)
                .with_parameter(field, message.clone())
                .into()
        }
    };
    problem.with_request_id(request_id).into()
}
