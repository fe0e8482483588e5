use thiserror::Error;

use crate::{model::{AgentId, TypeId, ZoneId}, table::TableName};

/// Errors surfaced by one assembly request.
///
/// Every variant aborts the whole request: no table is returned when any
/// part of the assembly fails.
#[derive(Debug, Error)]
pub enum Error {
    /// The model name does not resolve to a catalog entry.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// One or more points fall inside no zone polygon of the model.
    #[error("{} point(s) outside the zone coverage of model '{model}': {indices:?}", .indices.len())]
    PointOutsideCoverage { model: String, indices: Vec<usize> },

    /// A keyed parameter row required by a point-indexed table is missing.
    #[error("missing {table} row for point {point} (zone {zone}, type {ty:?}, agent {agent:?})")]
    LookupMiss {
        table: TableName,
        point: usize,
        zone: ZoneId,
        ty: Option<TypeId>,
        agent: Option<AgentId>,
    },

    /// A stored record does not match the width declared by the table header.
    #[error("{table} record has {found} column(s), header declares {expected}")]
    HeaderMismatch { table: TableName, expected: usize, found: usize },

    /// A stored key column holds a value that is not an integral id.
    #[error("{table} column {column} holds {value}, which is not an integral id")]
    InvalidKey { table: TableName, column: &'static str, value: f64 },

    /// The store could not be reached or a query failed.
    #[error("store unavailable: {0:#}")]
    StoreUnavailable(anyhow::Error),
}

impl Error {
    /// Wrap a store-side failure.
    pub(crate) fn store(err: impl Into<anyhow::Error>) -> Self {
        Self::StoreUnavailable(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
