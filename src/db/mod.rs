mod postgres;
#[cfg(test)]
pub mod memory;

use std::future::Future;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::config::Config;
use crate::models::employee::{Employee, NewEmployee};

pub use postgres::PgEmployeeStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the insert.
    #[error("unique constraint violated: {}", .constraint.as_deref().unwrap_or("unknown"))]
    Conflict { constraint: Option<String> },

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::Conflict {
                    constraint: db_err.constraint().map(str::to_owned),
                };
            }
        }
        StoreError::Database(err)
    }
}

/// Persistence for employee records.
///
/// Uniqueness of `employee_id` and `email` is the backend's responsibility and
/// must surface as [`StoreError::Conflict`].
pub trait EmployeeStore: Send + Sync + 'static {
    fn create(
        &self,
        employee: NewEmployee,
    ) -> impl Future<Output = Result<Employee, StoreError>> + Send + '_;
}

pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
