use sea_orm::{EntityName, EntityTrait, Schema};
use sea_orm_migration::prelude::*;

use crate::infra::storage::entity::{estimate_offer, estimate_request, like, mover, review};

const LIKE_PAIR_INDEX: &str = "idx_like_mover_customer";

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create_with_indexes<E>(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr>
where
    E: EntityTrait + Copy,
{
    manager
        .create_table(schema.create_table_from_entity(entity).if_not_exists().to_owned())
        .await?;
    for mut index in schema.create_index_from_entity(entity) {
        manager.create_index(index.if_not_exists().to_owned()).await?;
    }
    Ok(())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        // Parents before children: the child tables carry foreign keys.
        create_with_indexes(manager, &schema, mover::Entity).await?;
        create_with_indexes(manager, &schema, estimate_request::Entity).await?;
        create_with_indexes(manager, &schema, review::Entity).await?;
        create_with_indexes(manager, &schema, estimate_offer::Entity).await?;
        create_with_indexes(manager, &schema, like::Entity).await?;

        // One like per (mover, customer); duplicates would repeat a mover
        // inside a liked-movers page.
        manager
            .create_index(
                Index::create()
                    .name(LIKE_PAIR_INDEX)
                    .table(like::Entity)
                    .col(like::Column::MoverId)
                    .col(like::Column::CustomerId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            like::Entity.table_ref(),
            estimate_offer::Entity.table_ref(),
            review::Entity.table_ref(),
            estimate_request::Entity.table_ref(),
            mover::Entity.table_ref(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}
