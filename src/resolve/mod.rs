//! Point-to-zone resolution.

use std::collections::{btree_map::Entry, BTreeMap, BTreeSet};

use crate::{
    error::{Error, Result},
    model::{Model, ZoneId},
    point::ProjectedPoint,
    store::Session,
};

/// Resolved point index -> zone id. Points outside every zone are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneMap {
    zones: BTreeMap<usize, ZoneId>,
}

impl ZoneMap {
    #[inline] pub fn get(&self, index: usize) -> Option<ZoneId> { self.zones.get(&index).copied() }

    #[inline] pub fn len(&self) -> usize { self.zones.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.zones.is_empty() }

    /// Iterate over `(point_index, zone_id)` in point order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, ZoneId)> + '_ {
        self.zones.iter().map(|(&index, &zone)| (index, zone))
    }

    /// Distinct zones touched by the resolved points.
    pub fn scope(&self) -> BTreeSet<ZoneId> {
        self.zones.values().copied().collect()
    }

    /// Indices among `0..count` with no zone.
    pub fn missing(&self, count: usize) -> Vec<usize> {
        (0..count).filter(|index| !self.zones.contains_key(index)).collect()
    }

    /// Fail with `PointOutsideCoverage` unless all of `0..count` resolved.
    pub fn ensure_complete(&self, model: &Model, count: usize) -> Result<()> {
        let indices = self.missing(count);
        if indices.is_empty() {
            return Ok(());
        }
        Err(Error::PointOutsideCoverage { model: model.name().to_string(), indices })
    }

    /// Record a containment hit, keeping the smallest zone id per point.
    fn insert(&mut self, index: usize, zone: ZoneId) {
        match self.zones.entry(index) {
            Entry::Vacant(entry) => { entry.insert(zone); }
            Entry::Occupied(mut entry) => {
                if zone < *entry.get() {
                    entry.insert(zone);
                }
            }
        }
    }
}

impl FromIterator<(usize, ZoneId)> for ZoneMap {
    fn from_iter<I: IntoIterator<Item = (usize, ZoneId)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (index, zone) in iter {
            map.insert(index, zone);
        }
        map
    }
}

/// Maps projected points to the zone polygons of a model with one batched
/// containment query.
pub struct ZoneResolver<'a> {
    session: &'a mut dyn Session,
}

impl<'a> ZoneResolver<'a> {
    pub fn new(session: &'a mut dyn Session) -> Self {
        Self { session }
    }

    /// Resolve every point in a single round trip. A model without zones
    /// yields an empty map.
    pub fn resolve(&mut self, model: &Model, points: &[ProjectedPoint]) -> Result<ZoneMap> {
        if points.is_empty() {
            return Ok(ZoneMap::default());
        }

        let hits = self.session.locate(model.id(), points).map_err(Error::store)?;
        let map = hits.into_iter().collect::<ZoneMap>();

        tracing::debug!(
            model = model.name(),
            resolved = map.len(),
            unresolved = points.len().saturating_sub(map.len()),
            zones = map.scope().len(),
            "resolved points to zones",
        );
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, Coord, MultiPolygon};

    use super::*;
    use crate::{
        model::{Headers, ModelHandle},
        store::{MemStore, ModelData, Store},
    };

    fn square(x0: f64, y0: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size),
            (x: x0, y: y0),
        ]])
    }

    fn make_test_model() -> Model {
        Model::new(ModelHandle { id: 1, name: "grid".into() }, Headers::default())
    }

    fn at(index: usize, x: f64, y: f64) -> ProjectedPoint {
        ProjectedPoint { index, coord: Coord { x, y } }
    }

    fn make_test_store() -> MemStore {
        let mut data = ModelData::new(1, "grid", Headers::default());
        data.add_zone(10, square(0.0, 0.0, 10.0), vec![]);
        data.add_zone(20, square(10.0, 0.0, 10.0), vec![]);
        data.add_zone(5, square(15.0, 5.0, 10.0), vec![]);
        let store = MemStore::new();
        store.insert_model(data).unwrap();
        store.insert_model(ModelData::new(2, "empty", Headers::default())).unwrap();
        store
    }

    #[test]
    fn resolves_in_one_round_trip() {
        let store = make_test_store();
        let mut session = store.checkout().unwrap();
        let points = [at(0, 1.0, 1.0), at(1, 12.0, 1.0), at(2, 100.0, 100.0), at(3, 2.0, 3.0)];

        let map = ZoneResolver::new(session.as_mut()).resolve(&make_test_model(), &points).unwrap();

        assert_eq!(map.iter().collect::<Vec<_>>(), vec![(0, 10), (1, 20), (3, 10)]);
        assert_eq!(map.scope().into_iter().collect::<Vec<_>>(), vec![10, 20]);
        assert_eq!(map.missing(4), vec![2]);
        assert_eq!(store.query_count(), 1);
    }

    #[test]
    fn overlap_prefers_smallest_zone_id() {
        let store = make_test_store();
        let mut session = store.checkout().unwrap();
        let map = ZoneResolver::new(session.as_mut())
            .resolve(&make_test_model(), &[at(0, 17.0, 7.0)])
            .unwrap();
        assert_eq!(map.get(0), Some(5));
    }

    #[test]
    fn duplicate_hits_keep_smallest() {
        let map = [(0, 30), (0, 12), (1, 4), (0, 20)].into_iter().collect::<ZoneMap>();
        assert_eq!(map.get(0), Some(12));
        assert_eq!(map.get(1), Some(4));
    }

    #[test]
    fn model_without_zones_gives_empty_map() {
        let store = make_test_store();
        let mut session = store.checkout().unwrap();
        let model = Model::new(ModelHandle { id: 2, name: "empty".into() }, Headers::default());
        let map = ZoneResolver::new(session.as_mut()).resolve(&model, &[at(0, 1.0, 1.0)]).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn incomplete_map_names_every_missing_point() {
        let map = [(1, 10)].into_iter().collect::<ZoneMap>();
        let err = map.ensure_complete(&make_test_model(), 3).unwrap_err();
        assert!(matches!(err, Error::PointOutsideCoverage { ref indices, .. } if indices == &vec![0, 2]));
        assert!(map.ensure_complete(&make_test_model(), 0).is_ok());
    }
}
