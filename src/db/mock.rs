//! Mock database client for testing.
//!
//! Provides an in-memory stand-in that returns canned results, fails on
//! chosen statements and remembers everything it was asked to run.

use super::{ColumnInfo, DatabaseClient, QueryResult, Value};
use crate::error::{Result, SynthError};
use async_trait::async_trait;
use std::sync::Mutex;

/// A mock database client that returns predefined results.
#[derive(Debug, Default)]
pub struct MockDatabaseClient {
    failing_fragments: Vec<String>,
    rows_per_select: usize,
    executed: Mutex<Vec<String>>,
}

impl MockDatabaseClient {
    /// Creates a mock that answers every SELECT with a single row.
    pub fn new() -> Self {
        Self {
            rows_per_select: 1,
            ..Default::default()
        }
    }

    /// Makes every statement containing `fragment` fail with a query error.
    pub fn failing_on(mut self, fragment: impl Into<String>) -> Self {
        self.failing_fragments.push(fragment.into());
        self
    }

    /// Sets how many rows each SELECT returns.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows_per_select = rows;
        self
    }

    /// Returns the statements executed so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .map(|executed| executed.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(sql.to_string());
        }

        if let Some(fragment) = self
            .failing_fragments
            .iter()
            .find(|fragment| sql.contains(fragment.as_str()))
        {
            return Err(SynthError::query(format!("no such table: {fragment}")));
        }

        let sql_upper = sql.trim_start().to_uppercase();
        if sql_upper.starts_with("SELECT") || sql_upper.starts_with("WITH") {
            let columns = vec![
                ColumnInfo::new("row_number"),
                ColumnInfo::new("result"),
            ];
            let rows = (1..=self.rows_per_select)
                .map(|i| {
                    vec![
                        Value::Int(i as i64),
                        Value::String(format!("Mock result for: {sql}")),
                    ]
                })
                .collect();

            Ok(QueryResult::with_data(columns, rows))
        } else {
            Ok(QueryResult::new())
        }
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
