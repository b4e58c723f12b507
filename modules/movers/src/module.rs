//! Wiring: connection -> repository -> service -> router.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use crate::api::rest::routes::register_routes;
use crate::config::MoversConfig;
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmMoversRepository;

pub fn service(conn: DatabaseConnection, config: &MoversConfig) -> Arc<Service> {
    let repo = SeaOrmMoversRepository::new(conn);
    Arc::new(Service::new(Arc::new(repo), ServiceConfig::from(config)))
}

pub fn router(conn: DatabaseConnection, config: &MoversConfig) -> Router {
    register_routes(Router::new(), service(conn, config))
}

pub async fn migrate(conn: &DatabaseConnection) -> anyhow::Result<()> {
    Migrator::up(conn, None)
        .await
        .context("applying movers migrations")?;
    tracing::info!("movers schema is up to date");
    Ok(())
}
