//! SQL side of cursor pagination, on top of sea-orm / sea-query.
//!
//! Listings build a [`QueryPlan`] (base table, joins, filters), then hand it
//! to [`paginate`] together with a [`pagination_core::PageRequest`].

pub mod filter;
pub mod keyset;
pub mod paginate;
pub mod plan;

pub use filter::{compile_flag_filter, parse_flag_keys};
pub use keyset::{bind_value, cursor_after, keyset_condition, resolve_field_column};
pub use paginate::{clamp_limit, paginate, LimitCfg};
pub use plan::{QualifiedColumn, QueryPlan, ID_COLUMN};
