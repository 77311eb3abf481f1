//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the operational ledgers
//! - Repository abstractions for data access

pub mod entities;
pub mod repositories;

pub use repositories::{
    KasbonRepository, PayrollRepository, ReportRepository, TransactionRepository,
};

use std::time::Duration;

use getah_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool using the configured sizing.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

    Database::connect(options).await
}
