//! The geometry-aware store the assembly runs against.
//!
//! A `Store` hands out one `Session` per request. Each `Session` method is a
//! single round trip; batched methods take the whole key list at once so a
//! request costs a constant number of round trips regardless of its size.

mod mem;

use std::sync::Arc;

use anyhow::Result;

use crate::{
    model::{AgentId, Headers, ModelHandle, ModelId, TypeId, ZoneId},
    point::ProjectedPoint,
    table::TableName,
};

pub use mem::{MemStore, ModelData};

/// Key of a stored parameter row. Which parts are set depends on the
/// table's `Scope`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RowKey {
    pub agent: Option<AgentId>,
    pub ty: Option<TypeId>,
    pub zone: Option<ZoneId>,
}

impl RowKey {
    pub fn zone(zone: ZoneId) -> Self {
        Self { zone: Some(zone), ..Default::default() }
    }

    pub fn agent_zone(agent: AgentId, zone: ZoneId) -> Self {
        Self { agent: Some(agent), zone: Some(zone), ..Default::default() }
    }

    pub fn zone_type(ty: TypeId, zone: ZoneId) -> Self {
        Self { ty: Some(ty), zone: Some(zone), ..Default::default() }
    }

    pub fn agent_zone_type(agent: AgentId, ty: TypeId, zone: ZoneId) -> Self {
        Self { agent: Some(agent), ty: Some(ty), zone: Some(zone) }
    }
}

/// One row of the client-built VALUES list of a batched lookup:
/// the request point it serves plus the stored row it joins against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub point: usize,
    pub zone: ZoneId,
    pub ty: Option<TypeId>,
    pub agent: Option<AgentId>,
}

impl LookupKey {
    #[inline]
    pub fn row_key(&self) -> RowKey {
        RowKey { agent: self.agent, ty: self.ty, zone: Some(self.zone) }
    }
}

/// A request-scoped view of the store. Dropping it releases whatever was
/// acquired by `Store::checkout`.
pub trait Session {
    /// Resolve a model name to its catalog identity.
    fn find_model(&mut self, name: &str) -> Result<Option<ModelHandle>>;

    /// Fetch all four header lists of a model in one query.
    fn model_headers(&mut self, model: ModelId) -> Result<Option<Headers>>;

    /// Batched containment: the zone strictly containing each point.
    /// Points inside no zone are absent from the result.
    fn locate(&mut self, model: ModelId, points: &[ProjectedPoint]) -> Result<Vec<(usize, ZoneId)>>;

    /// All full records of a model-scoped table.
    fn model_rows(&mut self, model: ModelId, table: TableName) -> Result<Vec<Vec<f64>>>;

    /// Batched keyed lookup. The result is aligned with `keys`; a key with
    /// no stored row yields `None`.
    fn lookup(&mut self, model: ModelId, table: TableName, keys: &[LookupKey]) -> Result<Vec<Option<Vec<f64>>>>;
}

/// A shareable handle on the store. Many requests may hold sessions at once.
pub trait Store: Send + Sync {
    fn checkout(&self) -> Result<Box<dyn Session + '_>>;
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn checkout(&self) -> Result<Box<dyn Session + '_>> {
        (**self).checkout()
    }
}

impl<S: Store + ?Sized> Store for &S {
    fn checkout(&self) -> Result<Box<dyn Session + '_>> {
        (**self).checkout()
    }
}
