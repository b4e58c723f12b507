//! HTTP-facing helpers shared by module REST layers.

pub mod openapi;
pub mod pagination;
pub mod problem;
pub mod request_id;

pub use openapi::{GetOperation, OpenApiDoc, ParamLocation, ParamSpec};
pub use pagination::{error_code, pagination_error_to_problem};
pub use problem::{
    bad_request, internal_error, Problem, ProblemResponse, ValidationError,
    APPLICATION_PROBLEM_JSON,
};
pub use request_id::{request_id, REQUEST_ID_HEADER};
