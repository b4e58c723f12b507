pub mod entity;
pub mod migrations;
pub mod rows;
pub mod sea_orm_repo;
pub mod stats;
