//! Raw rows fetched by the listing plans, and their cursor accessors.

use chrono::{DateTime, Utc};
use pagination_core::{CursorRow, CursorValue};
use sea_orm::FromQueryResult;
use serde_json::Value as Json;

use crate::contract::model::{MoverSummary, OpenRequest};
use crate::infra::storage::stats::{
    AVERAGE_RATING, CONFIRMED_ESTIMATE_COUNT, LIKE_COUNT, REVIEW_COUNT,
};

pub const MOVER_COLUMNS: [&str; 7] = [
    "id",
    "nickname",
    "experience",
    "intro",
    "service_type",
    "service_region",
    "created_at",
];

pub const REQUEST_COLUMNS: [&str; 7] = [
    "id",
    "customer_id",
    "move_type",
    "move_date",
    "from_address",
    "to_address",
    "created_at",
];

#[derive(Debug, Clone, FromQueryResult)]
pub struct MoverRow {
    pub id: String,
    pub nickname: String,
    pub experience: i32,
    pub intro: String,
    pub service_type: Json,
    pub service_region: Json,
    pub created_at: DateTime<Utc>,
    pub review_count: i64,
    pub average_rating: f64,
    pub confirmed_estimate_count: i64,
    pub like_count: i64,
}

impl CursorRow for MoverRow {
    fn cursor_id(&self) -> String {
        self.id.clone()
    }

    fn base_value(&self, column: &str) -> Option<CursorValue> {
        match column {
            "experience" => Some(CursorValue::Integer(i64::from(self.experience))),
            "created_at" => Some(CursorValue::Timestamp(self.created_at)),
            _ => None,
        }
    }

    fn stats_value(&self, column: &str) -> Option<CursorValue> {
        match column {
            REVIEW_COUNT => Some(CursorValue::Integer(self.review_count)),
            AVERAGE_RATING => Some(CursorValue::Float(self.average_rating)),
            CONFIRMED_ESTIMATE_COUNT => Some(CursorValue::Integer(self.confirmed_estimate_count)),
            LIKE_COUNT => Some(CursorValue::Integer(self.like_count)),
            _ => None,
        }
    }
}

/// Keys of a JSON flag map whose value is `true`, sorted.
fn enabled_flags(flags: &Json) -> Vec<String> {
    let mut keys: Vec<String> = flags
        .as_object()
        .map(|map| {
            map.iter()
                .filter(|(_, v)| v.as_bool() == Some(true))
                .map(|(k, _)| k.clone())
                .collect()
        })
        .unwrap_or_default();
    keys.sort();
    keys
}

impl From<MoverRow> for MoverSummary {
    fn from(row: MoverRow) -> Self {
        Self {
            service_types: enabled_flags(&row.service_type),
            service_regions: enabled_flags(&row.service_region),
            id: row.id,
            nickname: row.nickname,
            experience: row.experience,
            intro: row.intro,
            created_at: row.created_at,
            review_count: u64::try_from(row.review_count).unwrap_or_default(),
            average_rating: row.average_rating,
            confirmed_estimate_count: u64::try_from(row.confirmed_estimate_count)
                .unwrap_or_default(),
            like_count: u64::try_from(row.like_count).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct RequestRow {
    pub id: String,
    pub customer_id: String,
    pub move_type: String,
    pub move_date: DateTime<Utc>,
    pub from_address: String,
    pub to_address: String,
    pub created_at: DateTime<Utc>,
}

impl CursorRow for RequestRow {
    fn cursor_id(&self) -> String {
        self.id.clone()
    }

    fn base_value(&self, column: &str) -> Option<CursorValue> {
        match column {
            "move_date" => Some(CursorValue::Timestamp(self.move_date)),
            "created_at" => Some(CursorValue::Timestamp(self.created_at)),
            _ => None,
        }
    }

    // Requests are never joined with mover statistics.
    fn stats_value(&self, _column: &str) -> Option<CursorValue> {
        None
    }
}

impl From<RequestRow> for OpenRequest {
    fn from(row: RequestRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            move_type: row.move_type,
            move_date: row.move_date,
            from_address: row.from_address,
            to_address: row.to_address,
            created_at: row.created_at,
        }
    }
}
