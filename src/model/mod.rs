mod catalog;
mod model;

pub use catalog::ModelCatalog;
pub use model::{AgentId, Headers, Model, ModelHandle, ModelId, TypeId, ZoneId};
