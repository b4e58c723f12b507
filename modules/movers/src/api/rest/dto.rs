use chrono::{DateTime, Utc};
use pagination_core::CursorPage;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::contract::model::{MoverSummary, OpenRequest};

/// REST DTO for a listed mover with its statistics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoverDto {
    pub id: String,
    pub nickname: String,
    pub experience: i32,
    pub intro: String,
    pub service_types: Vec<String>,
    pub service_regions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub review_count: u64,
    pub average_rating: f64,
    pub confirmed_estimate_count: u64,
    pub like_count: u64,
}

/// One page of movers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoverPageDto {
    pub items: Vec<MoverDto>,
    /// Movers matching the filters, across all pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    pub next_cursor: Option<String>,
    pub has_next: bool,
}

/// REST DTO for a pending estimate request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequestDto {
    pub id: String,
    pub customer_id: String,
    pub move_type: String,
    pub move_date: DateTime<Utc>,
    pub from_address: String,
    pub to_address: String,
    pub created_at: DateTime<Utc>,
}

/// One page of pending estimate requests
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequestPageDto {
    pub items: Vec<EstimateRequestDto>,
    pub next_cursor: Option<String>,
    pub has_next: bool,
}

/// Query string shared by every listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub order: Option<String>,
    pub cursor: Option<String>,
    pub take: Option<u64>,
}

/// `GET /movers` query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMoversQuery {
    pub order: Option<String>,
    pub cursor: Option<String>,
    pub take: Option<u64>,
    pub service_type: Option<String>,
    pub service_region: Option<String>,
}

// Conversion implementations between REST DTOs and contract models

impl From<MoverSummary> for MoverDto {
    fn from(m: MoverSummary) -> Self {
        Self {
            id: m.id,
            nickname: m.nickname,
            experience: m.experience,
            intro: m.intro,
            service_types: m.service_types,
            service_regions: m.service_regions,
            created_at: m.created_at,
            review_count: m.review_count,
            average_rating: m.average_rating,
            confirmed_estimate_count: m.confirmed_estimate_count,
            like_count: m.like_count,
        }
    }
}

impl From<CursorPage<MoverSummary>> for MoverPageDto {
    fn from(page: CursorPage<MoverSummary>) -> Self {
        let page = page.map_items(MoverDto::from);
        Self {
            items: page.items,
            count: page.count,
            next_cursor: page.next_cursor,
            has_next: page.has_next,
        }
    }
}

impl From<OpenRequest> for EstimateRequestDto {
    fn from(r: OpenRequest) -> Self {
        Self {
            id: r.id,
            customer_id: r.customer_id,
            move_type: r.move_type,
            move_date: r.move_date,
            from_address: r.from_address,
            to_address: r.to_address,
            created_at: r.created_at,
        }
    }
}

impl From<CursorPage<OpenRequest>> for EstimateRequestPageDto {
    fn from(page: CursorPage<OpenRequest>) -> Self {
        let page = page.map_items(EstimateRequestDto::from);
        Self {
            items: page.items,
            next_cursor: page.next_cursor,
            has_next: page.has_next,
        }
    }
}

// A missing `order` reaches the engine as "" and is rejected there as an
// invalid order, same as any other unknown value.
impl From<PageQuery> for pagination_core::PageRequest {
    fn from(q: PageQuery) -> Self {
        Self {
            cursor: q.cursor,
            order: q.order.unwrap_or_default(),
            take: q.take,
        }
    }
}

impl From<ListMoversQuery> for crate::contract::model::MoverListQuery {
    fn from(q: ListMoversQuery) -> Self {
        Self {
            page: PageQuery {
                order: q.order,
                cursor: q.cursor,
                take: q.take,
            }
            .into(),
            service_type: q.service_type,
            service_region: q.service_region,
            with_count: true,
        }
    }
}
