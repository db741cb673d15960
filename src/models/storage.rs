use crate::models::book::BookRecord;
use crate::models::search::Role;
use crate::services::mapper::map_rows;
use crate::services::statement::{BindValue, Statement};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::{Executor, Statement as _};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to prepare statement: {0}")]
    StatementPrepare(#[source] sqlx::Error),
    #[error("Failed to execute statement: {0}")]
    StatementExecute(#[source] sqlx::Error),
    #[error("Failed to decode column '{column}': {message}")]
    RowDecode { column: String, message: String },
    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),
}

/// Read-only access to the `books` table.
#[async_trait]
pub trait BookStore {
    /// Runs one built statement and returns the rows in database order,
    /// projected for `role`.
    async fn search(&self, statement: &Statement, role: Role)
        -> Result<Vec<BookRecord>, StorageError>;
    async fn test_connection(&self) -> Result<(), StorageError>;
}

pub struct MySqlBackend {
    pool: MySqlPool,
}

impl MySqlBackend {
    pub async fn new(
        options: MySqlConnectOptions,
        max_connections: u32,
    ) -> Result<Self, StorageError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(StorageError::Connection)?;

        Ok(Self::from_pool(pool))
    }

    /// Wraps an existing pool, e.g. one built by a test against its own
    /// database.
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for MySqlBackend {
    async fn search(
        &self,
        statement: &Statement,
        role: Role,
    ) -> Result<Vec<BookRecord>, StorageError> {
        // The prepared statement stays in this connection's statement cache
        // and is reused by later requests; the connection itself returns to
        // the pool when `conn` drops.
        let mut conn = self.pool.acquire().await.map_err(StorageError::Connection)?;

        let prepared = (&mut *conn)
            .prepare(&statement.sql)
            .await
            .map_err(StorageError::StatementPrepare)?;

        let mut query = prepared.query();
        for bind in &statement.binds {
            query = match bind {
                BindValue::Integer(value) => query.bind(*value),
                BindValue::Text(value) => query.bind(value.as_str()),
            };
        }

        let rows = query
            .fetch_all(&mut *conn)
            .await
            .map_err(StorageError::StatementExecute)?;
        debug!("Statement returned {} rows", rows.len());

        map_rows(&rows, role)
    }

    async fn test_connection(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Connection)?;
        Ok(())
    }
}
