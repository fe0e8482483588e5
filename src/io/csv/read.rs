//! CSV reading operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::{Column, CsvReadOptions, DataType}};

/// Reads a CSV file from `path` into a Polars DataFrame.
/// Every column is read as text; callers cast to the type they need.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))
}

/// Values of a column as integers (key columns).
pub(crate) fn i64_values(column: &Column) -> Result<Vec<i64>> {
    let cast = column.cast(&DataType::Int64)
        .with_context(|| format!("[io::csv::read] Column '{}' is not integral", column.name()))?;
    cast.i64()?.into_iter()
        .enumerate()
        .map(|(row, value)| value
            .with_context(|| format!("[io::csv::read] Null in column '{}' at row {row}", column.name())))
        .collect()
}

/// Values of a column as floats (payload columns).
pub(crate) fn f64_values(column: &Column) -> Result<Vec<f64>> {
    let cast = column.cast(&DataType::Float64)
        .with_context(|| format!("[io::csv::read] Column '{}' is not numeric", column.name()))?;
    cast.f64()?.into_iter()
        .enumerate()
        .map(|(row, value)| value
            .with_context(|| format!("[io::csv::read] Null in column '{}' at row {row}", column.name())))
        .collect()
}

/// Values of a text column.
pub(crate) fn str_values(column: &Column) -> Result<Vec<String>> {
    let cast = column.cast(&DataType::String)?;
    cast.str()?.into_iter()
        .enumerate()
        .map(|(row, value)| value
            .map(str::to_string)
            .with_context(|| format!("[io::csv::read] Null in column '{}' at row {row}", column.name())))
        .collect()
}

/// Row-major float records from every column starting at `first`.
pub(crate) fn f64_rows(df: &DataFrame, first: usize) -> Result<Vec<Vec<f64>>> {
    let columns = df.get_columns().iter()
        .skip(first)
        .map(f64_values)
        .collect::<Result<Vec<_>>>()?;

    Ok((0..df.height())
        .map(|row| columns.iter().map(|values| values[row]).collect())
        .collect())
}
