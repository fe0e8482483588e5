//! Store directory reading operations.

use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};

use crate::{
    io::{csv::{f64_rows, i64_values, read_csv, str_values}, wkb::multipolygon_from_hex},
    store::{ModelData, RowKey},
    table::{Scope, TableName},
};

use super::{table_file, ModelFile, MODEL_FILE};

/// Read every model folder (a subdirectory holding `model.json`) under `root`.
pub(crate) fn read_store_dir(root: &Path) -> Result<Vec<ModelData>> {
    let mut dirs = fs::read_dir(root)
        .with_context(|| format!("[io::store::read] Failed to list store directory {}", root.display()))?
        .map(|entry| Ok(entry?.path()))
        .collect::<Result<Vec<_>>>()?;
    dirs.retain(|dir| dir.join(MODEL_FILE).is_file());
    dirs.sort();

    dirs.iter().map(|dir| read_model_dir(dir)).collect()
}

/// Read one model folder.
pub(crate) fn read_model_dir(dir: &Path) -> Result<ModelData> {
    let path = dir.join(MODEL_FILE);
    let bytes = fs::read(&path)
        .with_context(|| format!("[io::store::read] Failed to read {}", path.display()))?;
    let file: ModelFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("[io::store::read] Failed to parse {}", path.display()))?;

    let mut model = ModelData::new(file.id, &file.name, file.headers);
    for table in TableName::ALL {
        let path = dir.join(table_file(table));
        if !path.exists() {
            ensure!(table.is_optional(), "[io::store::read] Model '{}' is missing {}", file.name, path.display());
            continue;
        }
        read_table(&mut model, table, &path)
            .with_context(|| format!("[io::store::read] Failed to load {table} of model '{}'", file.name))?;
    }
    Ok(model)
}

fn read_table(model: &mut ModelData, table: TableName, path: &Path) -> Result<()> {
    let scope = table.scope();

    if table == TableName::Zones {
        let df = read_csv(path)?;
        ensure!(df.width() >= 2, "[io::store::read] Expected id and area columns, got {}", df.width());
        let ids = i64_values(&df.get_columns()[0])?;
        let areas = str_values(&df.get_columns()[1])?;
        let data = f64_rows(&df, 2)?;

        for ((id, area), data) in ids.into_iter().zip(areas).zip(data) {
            let shape = multipolygon_from_hex(&area)
                .with_context(|| format!("[io::store::read] Bad geometry for zone {id}"))?;
            model.add_zone(id, shape, data);
        }
        return Ok(());
    }

    let df = read_csv(path)?;
    if scope == Scope::Model {
        for record in f64_rows(&df, 0)? {
            model.add_record(table, record)?;
        }
        return Ok(());
    }

    let width = scope.key_width();
    ensure!(df.width() >= width, "[io::store::read] Expected {width} key columns, got {}", df.width());
    let keys = df.get_columns()[..width].iter()
        .map(i64_values)
        .collect::<Result<Vec<_>>>()?;

    for (row, payload) in f64_rows(&df, width)?.into_iter().enumerate() {
        let mut parts = keys.iter().map(|column| column[row]);
        let agent = if scope.has_agent() { parts.next() } else { None };
        let ty = if scope.has_type() { parts.next() } else { None };
        let key = RowKey { agent, ty, zone: parts.next() };
        model.add_row(table, key, payload)?;
    }
    Ok(())
}
