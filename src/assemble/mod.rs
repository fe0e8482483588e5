//! Builds the engine input tables of one request from the resolved points.

mod keys;

use std::cmp::Ordering;

use crate::{
    error::{Error, Result},
    model::{AgentId, Model},
    point::Point,
    resolve::ZoneMap,
    store::Session,
    table::{AssembledTable, InputTables, Scope, TableName},
};

pub(crate) use keys::expand_keys;

/// Joins the stored parameter rows of a model against the points of a
/// request. Every table costs one round trip, whatever the point count.
pub struct RecordAssembler<'a> {
    session: &'a mut dyn Session,
    model: &'a Model,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(session: &'a mut dyn Session, model: &'a Model) -> Self {
        Self { session, model }
    }

    /// Assemble `tables` for `points`. Every point must be resolved in `zones`.
    pub fn assemble(&mut self, points: &[Point], zones: &ZoneMap, tables: &[TableName]) -> Result<InputTables> {
        let needs_agents = tables.iter().any(|table| table.scope().has_agent());
        let agent_rows = if needs_agents || tables.contains(&TableName::Agents) {
            Some(self.model_records(TableName::Agents)?)
        } else {
            None
        };
        let agents = match &agent_rows {
            Some(rows) => agent_ids(rows)?,
            None => Vec::new(),
        };

        let mut output = InputTables::default();
        for &table in tables {
            let assembled = match (table, &agent_rows) {
                (TableName::Agents, Some(rows)) => self.fill(table, rows.clone())?,
                _ => self.assemble_table(table, points, zones, &agents)?,
            };
            tracing::debug!(table = %table, records = assembled.len(), "assembled table");
            output.insert(assembled);
        }
        Ok(output)
    }

    /// Assemble one table. `agents` lists the model's agent ids in
    /// ascending order and is only consulted by agent-keyed tables.
    pub fn assemble_table(
        &mut self,
        table: TableName,
        points: &[Point],
        zones: &ZoneMap,
        agents: &[AgentId],
    ) -> Result<AssembledTable> {
        match table.scope() {
            Scope::Model => {
                let records = self.model_records(table)?;
                self.fill(table, records)
            }
            scope => self.keyed_table(table, scope, points, zones, agents),
        }
    }

    /// All records of a model-scoped table, checked against the header and
    /// ordered by their leading columns.
    fn model_records(&mut self, table: TableName) -> Result<Vec<Vec<f64>>> {
        let expected = table.header(self.model.headers()).len();
        let mut records = self.session.model_rows(self.model.id(), table).map_err(Error::store)?;

        if let Some(record) = records.iter().find(|record| record.len() != expected) {
            return Err(Error::HeaderMismatch { table, expected, found: record.len() });
        }
        records.sort_by(|a, b| compare_records(a, b));
        Ok(records)
    }

    fn fill(&self, table: TableName, records: Vec<Vec<f64>>) -> Result<AssembledTable> {
        let mut assembled = AssembledTable::new(table, table.header(self.model.headers()));
        for record in records {
            assembled.push(record)?;
        }
        Ok(assembled)
    }

    fn keyed_table(
        &mut self,
        table: TableName,
        scope: Scope,
        points: &[Point],
        zones: &ZoneMap,
        agents: &[AgentId],
    ) -> Result<AssembledTable> {
        let header = table.header(self.model.headers());
        let payload_width = table.payload_width(self.model.headers());

        let keys = expand_keys(self.model, scope, points, zones, agents)?;
        let rows = if keys.is_empty() {
            Vec::new()
        } else {
            self.session.lookup(self.model.id(), table, &keys).map_err(Error::store)?
        };
        if rows.len() != keys.len() {
            return Err(Error::store(anyhow::anyhow!(
                "[assemble] {table} lookup returned {} row(s) for {} key(s)", rows.len(), keys.len()
            )));
        }

        let mut assembled = AssembledTable::new(table, header);
        for (key, row) in keys.iter().zip(rows) {
            let payload = row.ok_or(Error::LookupMiss {
                table,
                point: key.point,
                zone: key.zone,
                ty: key.ty,
                agent: key.agent,
            })?;
            if payload.len() != payload_width {
                return Err(Error::HeaderMismatch {
                    table,
                    expected: assembled.header().len(),
                    found: scope.key_width() + payload.len(),
                });
            }

            let mut record = Vec::with_capacity(assembled.header().len());
            record.extend(key.agent.map(|agent| agent as f64));
            record.extend(key.ty.map(|ty| ty as f64));
            record.push((key.point + 1) as f64);
            record.extend(payload);
            assembled.push(record)?;
        }
        Ok(assembled)
    }
}

/// Distinct agent ids (first column of the agents table), ascending.
fn agent_ids(records: &[Vec<f64>]) -> Result<Vec<AgentId>> {
    let mut ids = records.iter()
        .filter_map(|record| record.first())
        .map(|&value| {
            if value.fract() != 0.0 || value.abs() > AgentId::MAX as f64 {
                return Err(Error::InvalidKey { table: TableName::Agents, column: "IDAGENT", value });
            }
            Ok(value as AgentId)
        })
        .collect::<Result<Vec<_>>>()?;
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

/// Lexicographic order over record values.
fn compare_records(a: &[f64], b: &[f64]) -> Ordering {
    a.iter().zip(b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}
