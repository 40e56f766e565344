//! Splitting a query file into named SQL blocks.
//!
//! A query file looks like:
//!
//! ```text
//! -- Analytics queries for the shop database
//!
//! -- 1. Monthly Revenue Growth Rate
//! SELECT ...;
//!
//! -- 2. RFM Segmentation
//! -- Scores recency, frequency and monetary value.
//! WITH ...
//! ```
//!
//! Everything before the first `-- <n>. ` marker is a header and is ignored.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

static BLOCK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-- (\d+)\. ").expect("block marker pattern is valid"));

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--.*").expect("line comment pattern is valid"));

/// One named SQL statement from a query file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryBlock {
    /// Position of the block in the file, starting at 1.
    pub ordinal: usize,

    /// Number written in the block's marker, if it fits in a u32.
    pub number: Option<u32>,

    /// Display name following the marker.
    pub name: String,

    /// SQL body with line comments removed.
    pub sql: String,
}

/// Parses a query file into its blocks, in file order.
///
/// Blocks whose SQL is empty once comments are removed are skipped.
pub fn parse_query_blocks(content: &str) -> Vec<QueryBlock> {
    let markers: Vec<_> = BLOCK_MARKER.captures_iter(content).collect();
    let mut blocks = Vec::with_capacity(markers.len());

    for (i, captures) in markers.iter().enumerate() {
        let Some(marker) = captures.get(0) else {
            continue;
        };
        let end = markers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(content.len(), |next| next.start());
        let segment = content[marker.end()..end].trim();

        let (name, body) = match segment.split_once('\n') {
            Some((name, body)) => (name, body),
            None => (segment, ""),
        };
        let name = name.trim_end_matches('\r').trim().to_string();
        let sql = strip_line_comments(body);
        let ordinal = i + 1;

        if sql.is_empty() {
            debug!("Skipping block {ordinal} ({name}): no SQL after removing comments");
            continue;
        }

        blocks.push(QueryBlock {
            ordinal,
            number: captures.get(1).and_then(|n| n.as_str().parse().ok()),
            name,
            sql,
        });
    }

    blocks
}

/// Removes every `--` comment up to the end of its line and trims the result.
pub fn strip_line_comments(sql: &str) -> String {
    LINE_COMMENT.replace_all(sql, "").trim().to_string()
}
