//! WKB writing operations.

use geo::{LineString, MultiPolygon, Polygon};

use super::{WKB_LE, WKB_MULTIPOLYGON, WKB_POLYGON};

fn write_ring(out: &mut Vec<u8>, ring: &LineString<f64>) {
    out.extend((ring.0.len() as u32).to_le_bytes());
    for coord in &ring.0 {
        out.extend(coord.x.to_le_bytes());
        out.extend(coord.y.to_le_bytes());
    }
}

fn write_polygon(out: &mut Vec<u8>, polygon: &Polygon<f64>) {
    out.push(WKB_LE);
    out.extend(WKB_POLYGON.to_le_bytes());
    out.extend((1 + polygon.interiors().len() as u32).to_le_bytes());
    write_ring(out, polygon.exterior());
    for interior in polygon.interiors() {
        write_ring(out, interior);
    }
}

/// Encode a MultiPolygon as little-endian ISO WKB.
pub(crate) fn multipolygon_to_wkb(shape: &MultiPolygon<f64>) -> Vec<u8> {
    let mut out = Vec::new();
    out.push(WKB_LE);
    out.extend(WKB_MULTIPOLYGON.to_le_bytes());
    out.extend((shape.0.len() as u32).to_le_bytes());
    for polygon in &shape.0 {
        write_polygon(&mut out, polygon);
    }
    out
}

/// Encode a MultiPolygon as upper-case hex WKB.
pub(crate) fn multipolygon_to_hex(shape: &MultiPolygon<f64>) -> String {
    hex::encode_upper(multipolygon_to_wkb(shape))
}
