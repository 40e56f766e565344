//! Database abstraction layer for ecom-synth.
//!
//! Provides a trait-based interface for running SQL, so the query runner can
//! be driven by SQLite or by an in-memory mock.

mod mock;
mod sqlite;
mod types;

pub use mock::MockDatabaseClient;
pub use sqlite::SqliteClient;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Opens the SQLite database at `path` for querying.
pub async fn connect(path: &Path) -> Result<Box<dyn DatabaseClient>> {
    let client = SqliteClient::connect(path).await?;
    Ok(Box::new(client))
}

/// Trait defining the interface for database clients.
///
/// All database operations are async and return Results with SynthError.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a SQL statement and returns its result set.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Closes the database connection.
    async fn close(&self) -> Result<()>;
}
