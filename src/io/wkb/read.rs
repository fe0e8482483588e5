//! WKB reading operations.

use std::io::{Cursor, Read};

use anyhow::{bail, ensure, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};

use super::{EWKB_SRID_FLAG, EWKB_ZM_FLAGS, WKB_LE, WKB_MULTIPOLYGON, WKB_POLYGON};

/// Byte-order aware reader over one WKB buffer.
struct WkbReader<'a> {
    cursor: Cursor<&'a [u8]>,
    is_le: bool,
}

impl<'a> WkbReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { cursor: Cursor::new(bytes), is_le: true }
    }

    fn read_byte_order(&mut self) -> Result<()> {
        let mut byte_order = [0u8; 1];
        self.cursor.read_exact(&mut byte_order)
            .context("[io::wkb::read] Failed to read byte order")?;
        self.is_le = byte_order[0] == WKB_LE;
        Ok(())
    }

    fn read_u32(&mut self, what: &str) -> Result<u32> {
        let mut bytes = [0u8; 4];
        self.cursor.read_exact(&mut bytes)
            .with_context(|| format!("[io::wkb::read] Failed to read {what}"))?;
        Ok(if self.is_le { u32::from_le_bytes(bytes) } else { u32::from_be_bytes(bytes) })
    }

    fn read_f64(&mut self, what: &str) -> Result<f64> {
        let mut bytes = [0u8; 8];
        self.cursor.read_exact(&mut bytes)
            .with_context(|| format!("[io::wkb::read] Failed to read {what}"))?;
        Ok(if self.is_le { f64::from_le_bytes(bytes) } else { f64::from_be_bytes(bytes) })
    }

    /// Read byte order + geometry type (skipping any EWKB SRID); returns the base type.
    fn read_header(&mut self) -> Result<u32> {
        self.read_byte_order()?;
        let raw = self.read_u32("geometry type")?;
        ensure!(raw & EWKB_ZM_FLAGS == 0, "[io::wkb::read] Only 2D geometries are supported");
        if raw & EWKB_SRID_FLAG != 0 {
            self.read_u32("SRID")?;
        }
        Ok(raw & 0xFFFF)
    }

    fn read_ring(&mut self) -> Result<LineString<f64>> {
        let len = self.read_u32("ring length")?;
        let coords = (0..len)
            .map(|_| Ok(Coord { x: self.read_f64("x coordinate")?, y: self.read_f64("y coordinate")? }))
            .collect::<Result<Vec<_>>>()?;
        Ok(LineString::from(coords))
    }

    /// Read the body of a Polygon (after its header).
    fn read_polygon_body(&mut self) -> Result<Polygon<f64>> {
        let num_rings = self.read_u32("number of rings")?;
        ensure!(num_rings > 0, "[io::wkb::read] Polygon must have at least one ring");

        let exterior = self.read_ring()?;
        let interiors = (1..num_rings)
            .map(|_| self.read_ring())
            .collect::<Result<Vec<_>>>()?;
        Ok(Polygon::new(exterior, interiors))
    }

    fn is_exhausted(&self) -> bool {
        self.cursor.position() as usize == self.cursor.get_ref().len()
    }
}

/// Read a Polygon or MultiPolygon from (E)WKB bytes as a MultiPolygon.
pub(crate) fn multipolygon_from_wkb(bytes: &[u8]) -> Result<MultiPolygon<f64>> {
    let mut reader = WkbReader::new(bytes);

    let shape = match reader.read_header()? {
        WKB_POLYGON => MultiPolygon(vec![reader.read_polygon_body()?]),
        WKB_MULTIPOLYGON => {
            let count = reader.read_u32("polygon count")?;
            let polygons = (0..count)
                .map(|_| {
                    let ty = reader.read_header()?;
                    ensure!(ty == WKB_POLYGON, "[io::wkb::read] Expected Polygon inside MultiPolygon, got {ty}");
                    reader.read_polygon_body()
                })
                .collect::<Result<Vec<_>>>()?;
            MultiPolygon(polygons)
        }
        other => bail!("[io::wkb::read] Expected Polygon or MultiPolygon geometry type, got {other}"),
    };

    ensure!(reader.is_exhausted(), "[io::wkb::read] Trailing bytes after geometry");
    Ok(shape)
}

/// Read a hex-encoded (E)WKB geometry, as PostGIS prints geometry columns.
pub(crate) fn multipolygon_from_hex(hex_str: &str) -> Result<MultiPolygon<f64>> {
    let bytes = hex::decode(hex_str.trim())
        .context("[io::wkb::read] Geometry is not valid hex")?;
    multipolygon_from_wkb(&bytes)
}
