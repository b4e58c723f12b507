use async_trait::async_trait;
use pagination_core::{CursorPage, Error, PageRequest};
use pagination_db::LimitCfg;

use crate::contract::model::{MoverListQuery, MoverSummary, OpenRequest};

/// Port for the domain layer: the listings the storage must serve.
/// Each builds its base plan and hands paging to the shared engine.
#[async_trait]
pub trait MoversRepository: Send + Sync {
    /// All movers with statistics, optionally narrowed by flag filters.
    async fn list_movers(
        &self,
        query: &MoverListQuery,
        limits: LimitCfg,
    ) -> Result<CursorPage<MoverSummary>, Error>;

    /// Movers one customer liked, with statistics.
    async fn list_liked_movers(
        &self,
        customer_id: &str,
        page: &PageRequest,
        limits: LimitCfg,
    ) -> Result<CursorPage<MoverSummary>, Error>;

    /// Pending estimate requests. No statistics join.
    async fn list_open_requests(
        &self,
        page: &PageRequest,
        limits: LimitCfg,
    ) -> Result<CursorPage<OpenRequest>, Error>;
}
