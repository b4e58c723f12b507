use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mover")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub nickname: String,
    /// Years in business.
    pub experience: i32,
    pub intro: String,
    /// `{"SMALL": true, "HOME": false, ...}`
    pub service_type: Json,
    /// `{"SEOUL": true, "BUSAN": false, ...}`
    pub service_region: Json,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
