use chrono::{DateTime, Utc};
use pagination_core::PageRequest;

/// A mover as listed to customers, with its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MoverSummary {
    pub id: String,
    pub nickname: String,
    pub experience: i32,
    pub intro: String,
    /// Enabled service-type flags, sorted.
    pub service_types: Vec<String>,
    /// Enabled service-region flags, sorted.
    pub service_regions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub review_count: u64,
    pub average_rating: f64,
    pub confirmed_estimate_count: u64,
    pub like_count: u64,
}

/// A pending estimate request movers can bid on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub id: String,
    pub customer_id: String,
    pub move_type: String,
    pub move_date: DateTime<Utc>,
    pub from_address: String,
    pub to_address: String,
    pub created_at: DateTime<Utc>,
}

/// Mover listing input: paging plus the comma-separated flag filters.
#[derive(Debug, Clone, Default)]
pub struct MoverListQuery {
    pub page: PageRequest,
    /// e.g. `"SMALL,HOME"`; movers offering any of them match.
    pub service_type: Option<String>,
    /// e.g. `"SEOUL,BUSAN"`; movers serving any of them match.
    pub service_region: Option<String>,
    /// Report the number of matching movers alongside the page.
    pub with_count: bool,
}
