//! Console rendering of block reports.
//!
//! Text output shows a bordered preview table per block; JSON output writes one
//! object per block per line so it can be piped into other tools.

use std::io::Write;

use serde::Serialize;

use crate::db::{ColumnInfo, QueryResult, Row, Value};
use crate::error::{Result, SynthError};

use super::executor::{BlockOutcome, BlockReport, RunSummary};

/// Maximum width for any column.
const MAX_COLUMN_WIDTH: usize = 40;

/// Minimum width for any column.
const MIN_COLUMN_WIDTH: usize = 4;

/// Output format for the query runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable preview tables.
    #[default]
    Text,
    /// One JSON object per block per line.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: text or json")),
        }
    }
}

/// Writes block reports to an output stream.
pub struct ReportWriter<W: Write> {
    out: W,
    format: OutputFormat,
    preview_rows: usize,
}

impl<W: Write> ReportWriter<W> {
    /// Creates a report writer.
    pub fn new(out: W, format: OutputFormat, preview_rows: usize) -> Self {
        Self {
            out,
            format,
            preview_rows,
        }
    }

    /// Writes the report of one block.
    pub fn write_report(&mut self, report: &BlockReport) -> Result<()> {
        let rendered = match self.format {
            OutputFormat::Text => render_text(report, self.preview_rows),
            OutputFormat::Json => render_json(report, self.preview_rows)?,
        };
        self.write_str(&rendered)
    }

    /// Writes the closing summary line. JSON output has none.
    pub fn write_summary(&mut self, summary: &RunSummary) -> Result<()> {
        if self.format == OutputFormat::Json {
            return Ok(());
        }
        let line = format!(
            "\n{} queries: {} succeeded, {} failed\n",
            summary.total, summary.succeeded, summary.failed
        );
        self.write_str(&line)
    }

    /// Consumes the writer and returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.out
            .write_all(s.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| SynthError::output(format!("Failed to write report: {e}")))
    }
}

/// Renders one block report as text.
pub fn render_text(report: &BlockReport, preview_rows: usize) -> String {
    let name = &report.block.name;
    let mut out = format!("\n--- Running Query: {name} ---\n");

    match &report.outcome {
        BlockOutcome::Success(result) => out.push_str(&render_table(result, preview_rows)),
        BlockOutcome::Error(message) => {
            out.push_str(&format!("Error running {name}: {message}\n"));
        }
    }

    out
}

/// Renders the first `preview_rows` rows of a result as a bordered table.
pub fn render_table(result: &QueryResult, preview_rows: usize) -> String {
    if result.columns.is_empty() {
        return "(no columns)\n".to_string();
    }

    let rows = result.preview(preview_rows);
    let widths = column_widths(&result.columns, rows);
    let mut out = String::new();

    out.push_str(&border(&widths, '┌', '┬', '┐'));
    let headers: Vec<(String, bool)> = result
        .columns
        .iter()
        .map(|c| (c.name.clone(), false))
        .collect();
    out.push_str(&line(&widths, &headers));
    out.push_str(&border(&widths, '├', '┼', '┤'));

    for row in rows {
        let cells: Vec<(String, bool)> = row
            .iter()
            .map(|v| (v.to_display_string(), v.is_numeric()))
            .collect();
        out.push_str(&line(&widths, &cells));
    }
    out.push_str(&border(&widths, '└', '┴', '┘'));

    if rows.is_empty() {
        out.push_str("(no rows)\n");
    } else if rows.len() < result.total_rows {
        out.push_str(&format!(
            "(showing {} of {} rows)\n",
            rows.len(),
            result.total_rows
        ));
    } else {
        out.push_str(&format!(
            "{} row{}\n",
            rows.len(),
            if rows.len() == 1 { "" } else { "s" }
        ));
    }

    out
}

/// Calculates the display width of each column, capped at MAX_COLUMN_WIDTH.
fn column_widths(columns: &[ColumnInfo], rows: &[Row]) -> Vec<usize> {
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|col| col.name.chars().count().max(MIN_COLUMN_WIDTH))
        .collect();

    for row in rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.to_display_string().chars().count());
        }
    }

    widths.iter().map(|&w| w.min(MAX_COLUMN_WIDTH)).collect()
}

fn border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|&w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}\n", segments.join(&mid.to_string()))
}

/// Renders one row; the flag marks cells that are right-aligned.
fn line(widths: &[usize], cells: &[(String, bool)]) -> String {
    let rendered: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let (text, right) = cells
                .get(i)
                .map(|(text, right)| (truncate(text, width), *right))
                .unwrap_or_default();
            if right {
                format!(" {text:>width$} ")
            } else {
                format!(" {text:<width$} ")
            }
        })
        .collect();
    format!("│{}│\n", rendered.join("│"))
}

/// Truncates a string to `max_width` characters, adding an ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{kept}...")
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    ordinal: usize,
    number: Option<u32>,
    name: &'a str,
    status: &'static str,
    execution_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<&'a [Vec<Value>]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Renders one block report as a single JSON line.
pub fn render_json(report: &BlockReport, preview_rows: usize) -> Result<String> {
    let block = &report.block;
    let mut json = JsonReport {
        ordinal: block.ordinal,
        number: block.number,
        name: &block.name,
        status: "success",
        execution_ms: report.execution_time.as_millis(),
        columns: None,
        rows: None,
        total_rows: None,
        error: None,
    };

    match &report.outcome {
        BlockOutcome::Success(result) => {
            json.columns = Some(result.column_names());
            json.rows = Some(result.preview(preview_rows));
            json.total_rows = Some(result.total_rows);
        }
        BlockOutcome::Error(message) => {
            json.status = "error";
            json.error = Some(message.as_str());
        }
    }

    let mut line = serde_json::to_string(&json)
        .map_err(|e| SynthError::output(format!("Failed to encode report: {e}")))?;
    line.push('\n');
    Ok(line)
}
