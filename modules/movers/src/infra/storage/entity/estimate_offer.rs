use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum OfferStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

/// A mover's priced answer to an estimate request.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "estimate_offer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(indexed)]
    pub request_id: String,
    #[sea_orm(indexed)]
    pub mover_id: String,
    pub price: i64,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mover::Entity",
        from = "Column::MoverId",
        to = "super::mover::Column::Id",
        on_delete = "Cascade"
    )]
    Mover,
    #[sea_orm(
        belongs_to = "super::estimate_request::Entity",
        from = "Column::RequestId",
        to = "super::estimate_request::Column::Id",
        on_delete = "Cascade"
    )]
    Request,
}

impl Related<super::mover::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mover.def()
    }
}

impl Related<super::estimate_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Request.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
