//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it works with a `DatabaseConnection`
//! or a transaction.

use pagination_core::{CursorPage, Error, PageRequest};
use pagination_db::{compile_flag_filter, paginate, LimitCfg, QualifiedColumn, QueryPlan};
use sea_orm::{ActiveEnum, ConnectionTrait, DbErr};

use crate::contract::model::{MoverListQuery, MoverSummary, OpenRequest};
use crate::domain::repo::MoversRepository;
use crate::infra::storage::entity::estimate_request::{self, RequestStatus};
use crate::infra::storage::entity::{like, mover};
use crate::infra::storage::rows::{MoverRow, RequestRow, MOVER_COLUMNS, REQUEST_COLUMNS};
use crate::infra::storage::stats::join_mover_stats;

pub const MOVER_ALIAS: &str = "mover";
pub const REQUEST_ALIAS: &str = "request";
const LIKED_ALIAS: &str = "liked";

pub struct SeaOrmMoversRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmMoversRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

fn db_err(e: DbErr) -> Error {
    Error::Db(e.to_string())
}

/// Movers joined with their statistics.
fn mover_plan() -> QueryPlan {
    let mut plan = QueryPlan::from_table(mover::Entity, MOVER_ALIAS);
    plan.select_columns(MOVER_ALIAS, MOVER_COLUMNS);
    join_mover_stats(&mut plan);
    plan
}

#[async_trait::async_trait]
impl<C> MoversRepository for SeaOrmMoversRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn list_movers(
        &self,
        query: &MoverListQuery,
        limits: LimitCfg,
    ) -> Result<CursorPage<MoverSummary>, Error> {
        let backend = self.conn.get_database_backend();
        let mut plan = mover_plan();

        for (filter, column) in [
            (query.service_type.as_deref(), "service_type"),
            (query.service_region.as_deref(), "service_region"),
        ] {
            let column = plan.base_column(column);
            if let Some(cond) = compile_flag_filter(backend, filter, &column) {
                plan.and_where(cond);
            }
        }

        // Counted before paging adds the cursor predicate and limit.
        let unpaged = query.with_count.then(|| plan.clone());
        let page = paginate::<MoverRow, _>(&mut plan, &query.page, &self.conn, limits)
            .await?
            .map_items(MoverSummary::from);

        match unpaged {
            Some(unpaged) => {
                let total = unpaged.count(&self.conn).await.map_err(db_err)?;
                Ok(page.with_count(total))
            }
            None => Ok(page),
        }
    }

    async fn list_liked_movers(
        &self,
        customer_id: &str,
        page: &PageRequest,
        limits: LimitCfg,
    ) -> Result<CursorPage<MoverSummary>, Error> {
        let mut plan = mover_plan();
        let on = QueryPlan::columns_equal(
            &QualifiedColumn::new(LIKED_ALIAS, "mover_id"),
            &plan.base_column("id"),
        )
        .add(
            QualifiedColumn::new(LIKED_ALIAS, "customer_id")
                .expr()
                .eq(customer_id),
        );
        plan.inner_join_table(like::Entity, LIKED_ALIAS, on);

        let page = paginate::<MoverRow, _>(&mut plan, page, &self.conn, limits).await?;
        Ok(page.map_items(MoverSummary::from))
    }

    async fn list_open_requests(
        &self,
        page: &PageRequest,
        limits: LimitCfg,
    ) -> Result<CursorPage<OpenRequest>, Error> {
        let mut plan = QueryPlan::from_table(estimate_request::Entity, REQUEST_ALIAS);
        plan.select_columns(REQUEST_ALIAS, REQUEST_COLUMNS);
        let status = plan.base_column("status");
        plan.and_where(status.expr().eq(RequestStatus::Pending.to_value()));

        let page = paginate::<RequestRow, _>(&mut plan, page, &self.conn, limits).await?;
        Ok(page.map_items(OpenRequest::from))
    }
}
