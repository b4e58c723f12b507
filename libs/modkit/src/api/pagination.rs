//! Pagination failures rendered as Problem Details.

use axum::http::StatusCode;
use pagination_core::{Error, ErrorCategory};

use crate::api::problem::{Problem, ProblemResponse};

/// Stable machine code for a pagination error.
pub fn error_code(e: &Error) -> &'static str {
    match e {
        Error::InvalidOrder(_) | Error::InvalidDirection(_) | Error::UnsupportedOrder(_) => {
            "INVALID_ORDER"
        }
        Error::CursorInvalidBase64
        | Error::CursorInvalidJson
        | Error::CursorInvalidOrder(_)
        | Error::CursorMissingValue(_)
        | Error::CursorInvalidValue { .. } => "INVALID_CURSOR",
        Error::MissingSortValue(_) => "MISSING_SORT_VALUE",
        Error::StatsJoinMissing { .. } => "PAGINATION_MISCONFIGURED",
        Error::CursorEncode(_) => "CURSOR_ENCODE",
        Error::Db(_) => "INTERNAL_DB",
    }
}

/// Validation errors become 400 with the offending parameter attached.
/// Configuration errors are also 400 but logged at `error`: the listing asked
/// for an order it cannot serve. Database errors become 500 and their detail
/// stays in the log.
pub fn pagination_error_to_problem(e: &Error, instance: &str) -> ProblemResponse {
    let code = error_code(e);
    let problem = match e.category() {
        ErrorCategory::Validation => {
            tracing::debug!(error = %e, code, "rejected paging input");
            let title = match code {
                "INVALID_ORDER" => "Invalid Order",
                "INVALID_CURSOR" => "Invalid Cursor",
                _ => "Invalid Page",
            };
            let problem = Problem::new(StatusCode::BAD_REQUEST, title, e.to_string());
            match e.parameter() {
                Some(param) => problem.with_parameter(param, e.to_string()),
                None => problem,
            }
        }
        ErrorCategory::Configuration => {
            tracing::error!(error = %e, "listing is wired incorrectly");
            Problem::new(
                StatusCode::BAD_REQUEST,
                "Pagination Misconfigured",
                "This listing cannot be ordered by the requested field",
            )
            .with_parameter("order", e.to_string())
        }
        ErrorCategory::Internal => {
            tracing::error!(error = %e, code, "internal error while paging");
            let title = match e {
                Error::Db(_) => "Internal Database Error",
                _ => "Internal Error",
            };
            Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                title,
                "An internal error occurred while building the page",
            )
        }
    };

    problem.with_code(code).with_instance(instance).into()
}
