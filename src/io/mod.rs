//! IO module for format-specific reading and writing operations.
//!
//! # Format Modules
//!
//! - `csv` - CSV format for store tables and engine input files
//! - `wkb` - hex-encoded (E)WKB zone geometry, as PostGIS prints it
//! - `store` - store-level operations for reading/writing a complete store directory

pub(crate) mod csv;
pub(crate) mod store;
pub(crate) mod wkb;
