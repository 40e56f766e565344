//! CSV output for a generated dataset.

use super::model::Record;
use super::Dataset;
use crate::error::{Result, SynthError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes every table of the dataset into `dir`, one CSV file per table.
///
/// The directory is created if needed and existing files are overwritten.
/// Returns the paths written, in generation order.
pub fn write_dataset(dataset: &Dataset, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| {
        SynthError::output(format!(
            "Failed to create output directory {}: {e}",
            dir.display()
        ))
    })?;

    Ok(vec![
        write_table(dir, &dataset.customers)?,
        write_table(dir, &dataset.products)?,
        write_table(dir, &dataset.orders)?,
        write_table(dir, &dataset.order_items)?,
        write_table(dir, &dataset.reviews)?,
    ])
}

/// Writes one table with its header row, even when the table is empty.
fn write_table<T: Record>(dir: &Path, rows: &[T]) -> Result<PathBuf> {
    let path = dir.join(T::FILE_NAME);
    let output_err =
        |e: csv::Error| SynthError::output(format!("Failed to write {}: {e}", path.display()));

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .map_err(output_err)?;

    writer.write_record(T::HEADERS).map_err(output_err)?;
    for row in rows {
        writer.serialize(row).map_err(output_err)?;
    }
    writer
        .flush()
        .map_err(|e| SynthError::output(format!("Failed to write {}: {e}", path.display())))?;

    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(path)
}
