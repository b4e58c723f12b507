//! # ModKit
//!
//! Shared REST plumbing for marketplace modules: RFC 9457 problem
//! responses, the mapping of pagination errors onto them, and the OpenAPI
//! document listing routes are described in.

pub mod api;

pub use api::problem::{bad_request, internal_error, Problem, ProblemResponse, ValidationError};
pub use api::openapi::{GetOperation, OpenApiDoc};
pub use api::{pagination_error_to_problem, request_id};
