use std::sync::Arc;

use pagination_core::{CursorPage, PageRequest};
use pagination_db::LimitCfg;
use tracing::{debug, instrument};

use crate::contract::model::{MoverListQuery, MoverSummary, OpenRequest};
use crate::domain::error::DomainError;
use crate::domain::repo::MoversRepository;

/// Listing service. Depends only on the repository port.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn MoversRepository>,
    config: ServiceConfig,
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 5,
            max_page_size: 50,
        }
    }
}

impl From<&crate::config::MoversConfig> for ServiceConfig {
    fn from(cfg: &crate::config::MoversConfig) -> Self {
        Self {
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size,
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn MoversRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    fn limits(&self) -> LimitCfg {
        LimitCfg {
            default: self.config.default_page_size,
            max: self.config.max_page_size,
        }
    }

    #[instrument(
        name = "movers.service.list_movers",
        skip(self, query),
        fields(order = %query.page.order, service_type = ?query.service_type, service_region = ?query.service_region)
    )]
    pub async fn list_movers(
        &self,
        query: MoverListQuery,
    ) -> Result<CursorPage<MoverSummary>, DomainError> {
        let page = self.repo.list_movers(&query, self.limits()).await?;
        debug!(items = page.items.len(), has_next = page.has_next, "listed movers");
        Ok(page)
    }

    #[instrument(
        name = "movers.service.list_liked_movers",
        skip(self, page),
        fields(order = %page.order)
    )]
    pub async fn list_liked_movers(
        &self,
        customer_id: &str,
        page: PageRequest,
    ) -> Result<CursorPage<MoverSummary>, DomainError> {
        if customer_id.trim().is_empty() {
            return Err(DomainError::validation(
                "customer_id",
                "customer id cannot be empty",
            ));
        }
        let page = self
            .repo
            .list_liked_movers(customer_id, &page, self.limits())
            .await?;
        debug!(items = page.items.len(), has_next = page.has_next, "listed liked movers");
        Ok(page)
    }

    #[instrument(
        name = "movers.service.list_open_requests",
        skip(self, page),
        fields(order = %page.order)
    )]
    pub async fn list_open_requests(
        &self,
        page: PageRequest,
    ) -> Result<CursorPage<OpenRequest>, DomainError> {
        let page = self.repo.list_open_requests(&page, self.limits()).await?;
        debug!(items = page.items.len(), has_next = page.has_next, "listed open requests");
        Ok(page)
    }
}
