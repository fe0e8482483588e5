//! Store directory reading and writing: one folder per model holding
//! `model.json` plus one CSV file per parameter table.

mod read;
mod write;

pub(crate) use read::*;
pub(crate) use write::*;

use serde::{Deserialize, Serialize};

use crate::{model::{Headers, ModelId}, table::{Scope, TableName}};

const MODEL_FILE: &str = "model.json";

/// Contents of `model.json`.
#[derive(Debug, Serialize, Deserialize)]
struct ModelFile {
    id: ModelId,
    name: String,
    #[serde(default)]
    headers: Headers,
}

fn table_file(table: TableName) -> String {
    format!("{}.csv", table.as_str())
}

/// Column names of a stored table, key columns first.
fn stored_columns(table: TableName, headers: &Headers) -> Vec<String> {
    let scope = table.scope();
    if scope == Scope::Model {
        return table.header(headers);
    }

    let keys = match table {
        TableName::Zones => vec!["id", "area"],
        _ => [
            scope.has_agent().then_some("agents_id"),
            scope.has_type().then_some("types_id"),
            Some("zones_id"),
        ].into_iter().flatten().collect(),
    };

    let payload = table.fixed_header()[scope.key_width()..].iter()
        .map(|name| match *name {
            "M_IDX" => "markets_id".to_string(),
            other => other.to_lowercase(),
        })
        .chain(table.variable_header(headers).iter().cloned());

    keys.into_iter().map(str::to_string).chain(payload).collect()
}
