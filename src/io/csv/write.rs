//! CSV writing operations.

use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::CsvWriter};
use tempfile::NamedTempFile;

/// Write a DataFrame to a CSV file with the given separator.
/// The file is written beside `path` and renamed into place.
pub(crate) fn write_csv(df: &mut DataFrame, path: &Path, separator: u8) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("[io::csv::write] Failed to create directory {}", parent.display()))?;

    let mut tmp = NamedTempFile::new_in(parent)
        .context("[io::csv::write] Failed to create temp file")?;
    CsvWriter::new(&mut tmp)
        .include_header(true)
        .with_separator(separator)
        .finish(df)
        .with_context(|| format!("[io::csv::write] Failed to write CSV to {:?}", path))?;
    tmp.flush()?;
    tmp.as_file().sync_all().ok();

    tmp.persist(path)
        .with_context(|| format!("[io::csv::write] Failed to rename CSV into {}", path.display()))?;
    Ok(())
}
