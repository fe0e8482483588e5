//! Hex (E)WKB geometry reading and writing.

mod read;
mod write;

pub(crate) use read::*;
pub(crate) use write::*;

/// WKB geometry type for Polygon
const WKB_POLYGON: u32 = 3;
/// WKB geometry type for MultiPolygon
const WKB_MULTIPOLYGON: u32 = 6;
/// WKB byte order: little endian
const WKB_LE: u8 = 1;
/// EWKB flag marking an embedded SRID
const EWKB_SRID_FLAG: u32 = 0x2000_0000;
/// EWKB flags for Z and M dimensions
const EWKB_ZM_FLAGS: u32 = 0xC000_0000;
