use serde::{Deserialize, Serialize};

use crate::cursor::CursorValue;
use crate::order::FieldLocation;

/// Caller-facing paging input: an order string, an optional cursor from a
/// previous page, and an optional page size.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PageRequest {
    pub cursor: Option<String>,
    pub order: String,
    pub take: Option<u64>,
}

impl PageRequest {
    pub fn new(order: impl Into<String>) -> Self {
        Self {
            cursor: None,
            order: order.into(),
            take: None,
        }
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn with_take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    pub next_cursor: Option<String>,
    pub has_next: bool,
}

impl<T> CursorPage<T> {
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        let has_next = next_cursor.is_some();
        Self {
            items,
            count: None,
            next_cursor,
            has_next,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Map items while preserving the cursor metadata (domain -> DTO).
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> CursorPage<U> {
        CursorPage {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
            next_cursor: self.next_cursor,
            has_next: self.has_next,
        }
    }
}

/// A fetched row the engine can derive the next cursor from.
pub trait CursorRow {
    /// Tie-break key of the row (its primary id).
    fn cursor_id(&self) -> String;

    /// Value of a column of the listing's base entity.
    fn base_value(&self, column: &str) -> Option<CursorValue>;

    /// Value of a column of the joined statistics view; `None` when the row
    /// was fetched without it.
    fn stats_value(&self, column: &str) -> Option<CursorValue>;

    fn value_at(&self, location: FieldLocation) -> Option<CursorValue> {
        match location {
            FieldLocation::Base(column) => self.base_value(column),
            FieldLocation::Stats(column) => self.stats_value(column),
        }
    }
}
