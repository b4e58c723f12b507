use thiserror::Error;

/// Coarse classification used by callers to pick status codes and log levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad user input (order string, cursor).
    Validation,
    /// The listing was wired incorrectly by its caller.
    Configuration,
    /// Storage failure.
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid order '{0}': expected '<field> <ASC|DESC>'")]
    InvalidOrder(String),

    #[error("invalid sort direction '{0}': expected ASC or DESC")]
    InvalidDirection(String),

    #[error("cursor is not valid base64")]
    CursorInvalidBase64,

    #[error("cursor does not contain a valid JSON envelope")]
    CursorInvalidJson,

    #[error("cursor carries an invalid order: {0}")]
    CursorInvalidOrder(String),

    #[error("cursor is missing the '{0}' value")]
    CursorMissingValue(String),

    #[error("cursor value for '{field}' must be a {expected}")]
    CursorInvalidValue {
        field: String,
        expected: &'static str,
    },

    #[error("cannot build next cursor: last row has no value for '{0}'")]
    MissingSortValue(String),

    #[error("cannot encode next cursor: {0}")]
    CursorEncode(String),

    #[error("this listing cannot be ordered by '{0}'")]
    UnsupportedOrder(String),

    #[error("ordering by '{field}' requires the '{alias}' view to be joined")]
    StatsJoinMissing { alias: String, field: String },

    #[error("database error: {0}")]
    Db(String),
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::StatsJoinMissing { .. } => ErrorCategory::Configuration,
            Error::Db(_) | Error::CursorEncode(_) => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }

    /// Request parameter the error should be reported against.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Error::InvalidOrder(_) | Error::InvalidDirection(_) | Error::UnsupportedOrder(_) => {
                Some("order")
            }
            Error::CursorInvalidBase64
            | Error::CursorInvalidJson
            | Error::CursorInvalidOrder(_)
            | Error::CursorMissingValue(_)
            | Error::CursorInvalidValue { .. } => Some("cursor"),
            _ => None,
        }
    }
}
