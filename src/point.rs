use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::{geom, model::TypeId};

/// One caller-supplied location, already validated by the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lng: f64,
    pub lat: f64,
    #[serde(default)]
    pub types: Vec<TypeId>,
}

impl Location {
    pub fn new(lng: f64, lat: f64, types: Vec<TypeId>) -> Self {
        Self { lng, lat, types }
    }
}

/// A location with its stable 0-based position in the request.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub index: usize,
    pub lng: f64,
    pub lat: f64,
    pub types: Vec<TypeId>,
}

impl Point {
    /// Number points in caller order.
    pub fn from_locations(locations: &[Location]) -> Vec<Point> {
        locations.iter().enumerate()
            .map(|(index, location)| Point {
                index,
                lng: location.lng,
                lat: location.lat,
                types: location.types.clone(),
            })
            .collect()
    }

    /// Normalize onto the plane of the stored zone geometry.
    pub fn project(&self) -> ProjectedPoint {
        ProjectedPoint { index: self.index, coord: geom::project(self.lng, self.lat) }
    }
}

/// A point in the projected plane, tagged with its request index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub index: usize,
    pub coord: Coord<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_caller_order() {
        let points = Point::from_locations(&[
            Location::new(1.0, 2.0, vec![3]),
            Location::new(4.0, 5.0, vec![]),
            Location::new(6.0, 7.0, vec![1, 2]),
        ]);

        assert_eq!(points.iter().map(|p| p.index).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(points[2].types, vec![1, 2]);
        assert!(points[1].types.is_empty());
    }

    #[test]
    fn projection_keeps_index() {
        let points = Point::from_locations(&[Location::new(0.0, 0.0, vec![]), Location::new(10.0, 20.0, vec![])]);
        let projected = points[1].project();
        assert_eq!(projected.index, 1);
        assert_eq!(projected.coord, geom::project(10.0, 20.0));
    }

    #[test]
    fn location_types_default_to_empty() {
        let location: Location = serde_json::from_str(r#"{"lng": -70.56, "lat": 41.85}"#).unwrap();
        assert_eq!(location, Location::new(-70.56, 41.85, vec![]));
    }
}
