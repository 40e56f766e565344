//! Query file parsing, execution and reporting.
//!
//! A query file is split into numbered blocks, each block runs on its own, and
//! a short preview of every result is written out as soon as it is available.

pub mod blocks;
pub mod executor;
pub mod report;

pub use blocks::{parse_query_blocks, strip_line_comments, QueryBlock};
pub use executor::{BlockOutcome, BlockReport, QueryRunner, RunSummary};
pub use report::{render_json, render_table, render_text, OutputFormat, ReportWriter};

use std::io::Write;
use std::path::Path;

use crate::db::DatabaseClient;
use crate::error::{Result, SynthError};
use tracing::{info, warn};

/// Reads a query file.
pub fn load_query_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        SynthError::config(format!(
            "Failed to read query file {}: {e}",
            path.display()
        ))
    })
}

/// Parses `content` and runs every block against `db`, writing each report
/// and the final summary to `writer`.
pub async fn run_queries<W: Write>(
    db: &dyn DatabaseClient,
    content: &str,
    writer: &mut ReportWriter<W>,
) -> Result<RunSummary> {
    let blocks = parse_query_blocks(content);
    if blocks.is_empty() {
        warn!("No query blocks found (expected markers like '-- 1. Name')");
    } else {
        info!("Found {} query blocks", blocks.len());
    }

    let runner = QueryRunner::new(db);
    let summary = runner
        .run_all(&blocks, |report| writer.write_report(report))
        .await?;
    writer.write_summary(&summary)?;

    Ok(summary)
}
