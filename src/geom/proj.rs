//! Spherical ("Google") Mercator projection of the stored zone geometry.
//!
//! Zone polygons are stored in the spherical Mercator plane (SRID 900913,
//! equivalent to EPSG:3857). The arithmetic below is kept in exactly this
//! operation order so projected points bit-match the stored coordinates.

use std::f64::consts::PI;

use geo::Coord;

/// Sphere radius of the projection, in meters.
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Latitude bound in degrees; the projection is singular at the poles.
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Project a geographic (longitude, latitude) pair in degrees onto the
/// Mercator plane. Latitude is clamped to +/- `MAX_LATITUDE` first.
pub fn project(lng: f64, lat: f64) -> Coord<f64> {
    let lat = lat.min(MAX_LATITUDE).max(-MAX_LATITUDE);
    let lat_sin = (lat / 180.0 * PI).sin();

    Coord {
        x: lng / 180.0 * PI * EARTH_RADIUS,
        y: ((1.0 + lat_sin) / (1.0 - lat_sin)).ln() / 2.0 * EARTH_RADIUS,
    }
}

/// Inverse of `project`: Mercator meters back to (longitude, latitude) degrees.
pub fn unproject(coord: Coord<f64>) -> (f64, f64) {
    let lng = coord.x / EARTH_RADIUS * 180.0 / PI;
    let lat = (coord.y / EARTH_RADIUS).sinh().atan() * 180.0 / PI;
    (lng, lat)
}
