use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(indexed)]
    pub mover_id: String,
    pub customer_id: String,
    /// 1..=5
    pub rating: i32,
    pub content: String,
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
}

impl Related<super::mover::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mover.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
