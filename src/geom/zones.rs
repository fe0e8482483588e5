use geo::{BoundingRect, Contains, Coord, MultiPolygon, Point};
use rstar::{RTree, RTreeObject, AABB};
use smallvec::SmallVec;

use crate::model::ZoneId;

/// R-tree entry: the envelope of one zone polygon and its slot in the index.
#[derive(Debug, Clone)]
struct ZoneBox {
    slot: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for ZoneBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope { self.envelope }
}

/// Zone polygons of one model in the projected plane, with an R-tree over
/// their bounding boxes for containment queries.
#[derive(Debug, Clone, Default)]
pub(crate) struct ZoneIndex {
    ids: Vec<ZoneId>,
    shapes: Vec<MultiPolygon<f64>>,
    rtree: RTree<ZoneBox>,
}

impl ZoneIndex {
    /// Add a single zone, keeping the R-tree current.
    /// Polygons without a bounding rectangle (empty geometry) are never matched.
    pub(crate) fn insert(&mut self, id: ZoneId, shape: MultiPolygon<f64>) {
        let slot = self.shapes.len();
        if let Some(rect) = shape.bounding_rect() {
            let envelope = AABB::from_corners(rect.min().into(), rect.max().into());
            self.rtree.insert(ZoneBox { slot, envelope });
        }
        self.ids.push(id);
        self.shapes.push(shape);
    }

    #[inline] pub(crate) fn len(&self) -> usize { self.shapes.len() }

    #[inline] pub(crate) fn is_empty(&self) -> bool { self.shapes.is_empty() }

    /// Iterate over `(zone id, polygon)` pairs in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (ZoneId, &MultiPolygon<f64>)> {
        self.ids.iter().copied().zip(self.shapes.iter())
    }

    /// Find the zone strictly containing `coord` (boundary and holes excluded).
    /// When zones overlap, the smallest zone id wins.
    pub(crate) fn locate(&self, coord: Coord<f64>) -> Option<ZoneId> {
        let point = Point::from(coord);
        let envelope = AABB::from_point([coord.x, coord.y]);

        let candidates: SmallVec<[ZoneId; 4]> = self.rtree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| self.shapes[entry.slot].contains(&point))
            .map(|entry| self.ids[entry.slot])
            .collect();

        candidates.into_iter().min()
    }
}
