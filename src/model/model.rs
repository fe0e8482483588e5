use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub type ModelId = i64;
pub type ZoneId = i64;
pub type TypeId = i64;   // Real-estate unit type
pub type AgentId = i64;

/// Catalog identity of a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelHandle {
    pub id: ModelId,
    pub name: Arc<str>,
}

/// Per-model names of the variable trailing columns of the zones, agents,
/// agents-zones and real-estates-zones tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Headers {
    pub zones: Vec<String>,
    pub agents: Vec<String>,
    pub agents_zones: Vec<String>,
    pub real_estates_zones: Vec<String>,
}

/// A resolved model: identity plus its header definitions.
/// Read once per request and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Model {
    handle: ModelHandle,
    headers: Arc<Headers>,
}

impl Model {
    pub fn new(handle: ModelHandle, headers: Headers) -> Self {
        Self { handle, headers: Arc::new(headers) }
    }

    #[inline] pub fn id(&self) -> ModelId { self.handle.id }

    #[inline] pub fn name(&self) -> &str { &self.handle.name }

    #[inline] pub fn handle(&self) -> &ModelHandle { &self.handle }

    #[inline] pub fn headers(&self) -> &Headers { &self.headers }
}
