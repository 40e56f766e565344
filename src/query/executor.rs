//! Running query blocks against a database.
//!
//! Every block runs on its own: a failing statement is captured in its report
//! and the runner moves on to the next block.

use std::time::{Duration, Instant};

use crate::db::{DatabaseClient, QueryResult};
use crate::error::Result;
use tracing::{info, warn};

use super::blocks::QueryBlock;

/// Runs query blocks one after another against a database client.
pub struct QueryRunner<'a> {
    db: &'a dyn DatabaseClient,
}

impl<'a> QueryRunner<'a> {
    /// Creates a new query runner.
    pub fn new(db: &'a dyn DatabaseClient) -> Self {
        Self { db }
    }

    /// Executes a single block, capturing any failure in the report.
    pub async fn run_block(&self, block: &QueryBlock) -> BlockReport {
        info!("Running query {}: {}", block.ordinal, block.name);

        let start = Instant::now();
        let result = self.db.execute_query(&block.sql).await;
        let execution_time = start.elapsed();

        let outcome = match result {
            Ok(query_result) => {
                info!(
                    "Query '{}' returned {} rows in {:?}",
                    block.name, query_result.total_rows, execution_time
                );
                BlockOutcome::Success(query_result)
            }
            Err(e) => {
                warn!("Query '{}' failed: {}", block.name, e);
                BlockOutcome::Error(e.to_string())
            }
        };

        BlockReport {
            block: block.clone(),
            outcome,
            execution_time,
        }
    }

    /// Executes every block in order, handing each report to `sink` as soon as
    /// it is ready.
    ///
    /// Block failures never stop the run. Only an error returned by `sink`
    /// does, and that error is propagated.
    pub async fn run_all<F>(&self, blocks: &[QueryBlock], mut sink: F) -> Result<RunSummary>
    where
        F: FnMut(&BlockReport) -> Result<()>,
    {
        let mut summary = RunSummary::default();

        for block in blocks {
            let report = self.run_block(block).await;
            summary.record(&report);
            sink(&report)?;
        }

        info!(
            "Ran {} queries: {} succeeded, {} failed",
            summary.total, summary.succeeded, summary.failed
        );
        Ok(summary)
    }
}

/// What happened when a block ran.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockOutcome {
    /// The statement ran and produced a result set (possibly empty).
    Success(QueryResult),
    /// The statement failed with this message.
    Error(String),
}

/// The result of running one block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockReport {
    /// The block that ran.
    pub block: QueryBlock,
    /// Its outcome.
    pub outcome: BlockOutcome,
    /// Wall-clock time spent executing it.
    pub execution_time: Duration,
}

impl BlockReport {
    /// Returns true if the block ran successfully.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BlockOutcome::Success(_))
    }
}

/// Counts of a complete run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, report: &BlockReport) {
        self.total += 1;
        if report.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}
