use std::{collections::BTreeMap, path::Path};

use anyhow::Context;
use polars::prelude::{Column, DataFrame};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{error::{Error, Result}, io::csv::write_csv, table::TableName};

/// A flat header + records table handed to the simulation engine.
/// Every record has exactly `header.len()` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct AssembledTable {
    name: TableName,
    header: Vec<String>,
    records: Vec<Vec<f64>>,
}

/// Unchecked table as read from JSON; rows go through `push`.
#[derive(Deserialize)]
struct RawTable {
    name: TableName,
    header: Vec<String>,
    records: Vec<Vec<f64>>,
}

impl TryFrom<RawTable> for AssembledTable {
    type Error = Error;

    fn try_from(raw: RawTable) -> Result<Self> {
        let mut table = Self::new(raw.name, raw.header);
        for record in raw.records {
            table.push(record)?;
        }
        Ok(table)
    }
}

impl AssembledTable {
    pub fn new(name: TableName, header: Vec<String>) -> Self {
        Self { name, header, records: Vec::new() }
    }

    #[inline] pub fn name(&self) -> TableName { self.name }

    #[inline] pub fn header(&self) -> &[String] { &self.header }

    #[inline] pub fn records(&self) -> &[Vec<f64>] { &self.records }

    #[inline] pub fn len(&self) -> usize { self.records.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Append a record, rejecting it if its width differs from the header.
    pub fn push(&mut self, record: Vec<f64>) -> Result<()> {
        if record.len() != self.header.len() {
            return Err(Error::HeaderMismatch {
                table: self.name,
                expected: self.header.len(),
                found: record.len(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Get the values of one column by header name.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let i = self.header.iter().position(|h| h == name)?;
        Some(self.records.iter().map(|record| record[i]).collect())
    }

    /// Convert to a Polars DataFrame with one Float64 column per header entry.
    pub fn to_dataframe(&self) -> anyhow::Result<DataFrame> {
        let columns = self.header.iter().enumerate()
            .map(|(i, name)| {
                let values = self.records.iter().map(|record| record[i]).collect::<Vec<f64>>();
                Column::new(name.as_str().into(), values)
            })
            .collect::<Vec<_>>();

        DataFrame::new(columns)
            .with_context(|| format!("[table] Failed to build {} frame", self.name))
    }
}

/// The complete set of tables produced by one assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InputTables {
    tables: BTreeMap<TableName, AssembledTable>,
}

impl InputTables {
    pub(crate) fn insert(&mut self, table: AssembledTable) {
        self.tables.insert(table.name(), table);
    }

    #[inline] pub fn get(&self, name: TableName) -> Option<&AssembledTable> { self.tables.get(&name) }

    #[inline] pub fn len(&self) -> usize { self.tables.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.tables.is_empty() }

    /// Iterate over tables in name order.
    pub fn iter(&self) -> impl Iterator<Item = &AssembledTable> {
        self.tables.values()
    }

    pub fn names(&self) -> impl Iterator<Item = TableName> + '_ {
        self.tables.keys().copied()
    }

    /// Write one `<table>.csv` per table, `;` separated with a header row.
    pub fn write_to_dir(&self, dir: &Path) -> anyhow::Result<()> {
        for table in self.iter() {
            let mut df = table.to_dataframe()?;
            write_csv(&mut df, &dir.join(format!("{}.csv", table.name())), b';')
                .with_context(|| format!("[table] Failed to write {}", table.name()))?;
        }
        Ok(())
    }

    /// Serialize as `{table_name: {name, header, records}}` JSON.
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("[table] Failed to serialize input tables")
    }
}

impl<'de> Deserialize<'de> for InputTables {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tables = BTreeMap::<TableName, AssembledTable>::deserialize(deserializer)?;
        if let Some((key, table)) = tables.iter().find(|(key, table)| **key != table.name()) {
            return Err(serde::de::Error::custom(format!("table {} stored under key {key}", table.name())));
        }
        Ok(Self { tables })
    }
}

impl std::ops::Index<TableName> for InputTables {
    type Output = AssembledTable;

    fn index(&self, name: TableName) -> &AssembledTable {
        &self.tables[&name]
    }
}
