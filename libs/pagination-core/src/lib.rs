//! Order grammar, cursor codec and page envelope shared by every listing.
//!
//! Nothing here touches storage: `pagination-db` turns these types into
//! SQL, and the REST layer turns [`Error`] into problem responses.

mod cursor;
mod error;
mod order;
mod page;

pub use cursor::{Cursor, CursorValue};
pub use error::{Error, ErrorCategory};
pub use order::{
    valid_orders, FieldKind, FieldLocation, OrderField, OrderSpec, SortDir, STATS_ALIAS,
};
pub use page::{CursorPage, CursorRow, PageRequest};

#[cfg(test)]
mod tests;
