#![doc = "Mu-Land input-table assembly API"]
mod assemble;
mod config;
mod error;
mod geom;
mod io;
mod model;
mod pipeline;
mod point;
mod resolve;
mod store;
mod table;

#[doc(inline)]
pub use assemble::RecordAssembler;

#[doc(inline)]
pub use config::Config;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use geom::{project, unproject, EARTH_RADIUS, MAX_LATITUDE};

#[doc(inline)]
pub use model::{AgentId, Headers, Model, ModelCatalog, ModelHandle, ModelId, TypeId, ZoneId};

#[doc(inline)]
pub use pipeline::Assembler;

#[doc(inline)]
pub use point::{Location, Point, ProjectedPoint};

#[doc(inline)]
pub use resolve::{ZoneMap, ZoneResolver};

#[doc(inline)]
pub use store::{LookupKey, MemStore, ModelData, RowKey, Session, Store};

#[doc(inline)]
pub use table::{AssembledTable, InputTables, Scope, TableName};
