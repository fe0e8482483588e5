//! Store directory writing operations.

use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use polars::{frame::DataFrame, prelude::{Column, NamedFrom}, series::Series};

use crate::{
    io::{csv::write_csv, wkb::multipolygon_to_hex},
    store::{ModelData, RowKey},
    table::{Scope, TableName},
};

use super::{stored_columns, table_file, ModelFile, MODEL_FILE};

/// Write one folder per model under `root`, named after the model.
pub(crate) fn write_store_dir(models: &[ModelData], root: &Path) -> Result<()> {
    for model in models {
        let name: &str = &model.handle().name;
        ensure!(
            !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != "..",
            "[io::store::write] Model name '{name}' is not usable as a directory name",
        );
        write_model_dir(model, &root.join(name))?;
    }
    Ok(())
}

/// Write `model.json` and every table file of one model.
/// Optional tables without rows are left out.
pub(crate) fn write_model_dir(model: &ModelData, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("[io::store::write] Failed to create {}", dir.display()))?;

    let file = ModelFile {
        id: model.handle().id,
        name: model.handle().name.to_string(),
        headers: model.headers().clone(),
    };
    let path = dir.join(MODEL_FILE);
    fs::write(&path, serde_json::to_vec_pretty(&file)?)
        .with_context(|| format!("[io::store::write] Failed to write {}", path.display()))?;

    for table in TableName::ALL {
        let mut df = table_frame(model, table)
            .with_context(|| format!("[io::store::write] Failed to build {table} of model '{}'", file.name))?;
        if table.is_optional() && df.height() == 0 {
            continue;
        }
        write_csv(&mut df, &dir.join(table_file(table)), b',')?;
    }
    Ok(())
}

/// Build a row-major table into named columns.
fn float_columns(names: &[String], rows: &[&[f64]]) -> Result<Vec<Column>> {
    for row in rows {
        ensure!(row.len() == names.len(), "[io::store::write] Row has {} values, expected {}", row.len(), names.len());
    }
    Ok(names.iter().enumerate()
        .map(|(i, name)| Column::new(name.as_str().into(), rows.iter().map(|row| row[i]).collect::<Vec<f64>>()))
        .collect())
}

fn table_frame(model: &ModelData, table: TableName) -> Result<DataFrame> {
    let names = stored_columns(table, model.headers());
    let scope = table.scope();

    let columns = if table == TableName::Zones {
        let zones = model.zones().collect::<Vec<_>>();
        let ids = zones.iter().map(|(id, _)| *id).collect::<Vec<i64>>();
        let areas = zones.iter().map(|(_, shape)| multipolygon_to_hex(shape)).collect::<Vec<String>>();
        let data = zones.iter()
            .map(|(id, _)| model.row(TableName::Zones, &RowKey::zone(*id)).map_or(&[][..], Vec::as_slice))
            .collect::<Vec<_>>();

        let mut columns: Vec<Column> = vec![
            Series::new(names[0].as_str().into(), ids).into(),
            Series::new(names[1].as_str().into(), areas).into(),
        ];
        columns.extend(float_columns(&names[2..], &data)?);
        columns
    } else if scope == Scope::Model {
        let rows = model.records(table).iter().map(Vec::as_slice).collect::<Vec<_>>();
        float_columns(&names, &rows)?
    } else {
        let mut rows = model.keyed_rows(table).collect::<Vec<_>>();
        rows.sort_by_key(|(key, _)| (key.agent, key.ty, key.zone));

        let key_names = &names[..scope.key_width()];
        let mut key_columns = vec![Vec::with_capacity(rows.len()); key_names.len()];
        for (key, _) in &rows {
            let parts = [key.agent, key.ty, key.zone].into_iter().flatten();
            for (column, value) in key_columns.iter_mut().zip(parts) {
                column.push(value);
            }
        }

        let payloads = rows.iter().map(|(_, payload)| payload.as_slice()).collect::<Vec<_>>();
        let mut columns = key_names.iter().zip(key_columns)
            .map(|(name, values): (&String, Vec<i64>)| Series::new(name.as_str().into(), values).into())
            .collect::<Vec<Column>>();
        columns.extend(float_columns(&names[key_names.len()..], &payloads)?);
        columns
    };

    DataFrame::new(columns).context("[io::store::write] Failed to assemble frame")
}
