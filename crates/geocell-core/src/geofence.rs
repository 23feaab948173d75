use serde::{Deserialize, Serialize};

use crate::edges::{EdgeLoop, SliceEdges};
use crate::latlng::{LatLng, Radians};

/// An array-backed closed loop, used as a polygon's exterior or hole ring.
///
/// Unlike [`CellBoundary`](crate::CellBoundary) a geofence has no vertex
/// limit. An empty geofence is the explicit "no shape" value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geofence {
    verts: Vec<LatLng>,
}

impl Geofence {
    pub fn new(verts: Vec<LatLng>) -> Self {
        Self { verts }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[LatLng] {
        &self.verts
    }

    pub fn vertex_count(&self) -> usize {
        self.verts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    pub fn into_vertices(self) -> Vec<LatLng> {
        self.verts
    }
}

impl From<Vec<LatLng>> for Geofence {
    fn from(verts: Vec<LatLng>) -> Self {
        Self::new(verts)
    }
}

impl FromIterator<LatLng> for Geofence {
    fn from_iter<I: IntoIterator<Item = LatLng>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl EdgeLoop for Geofence {
    type Unit = Radians;
    type Edges<'a> = SliceEdges<'a>;

    fn edges(&self) -> Self::Edges<'_> {
        SliceEdges::new(&self.verts)
    }

    fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::EdgeCursor;

    fn unit_square() -> Geofence {
        [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]
            .into_iter()
            .map(|(lat, lon)| LatLng::from_degrees(lat, lon))
            .collect()
    }

    #[test]
    fn test_empty_geofence_is_sentinel() {
        let fence = Geofence::empty();
        assert!(fence.is_empty());
        assert_eq!(fence.vertex_count(), 0);
        assert_ne!(fence, unit_square());

        let mut a = LatLng::default();
        let mut b = LatLng::default();
        assert!(!fence.edges().step(&mut a, &mut b));
    }

    #[test]
    fn test_square_has_four_chained_edges() {
        let fence = unit_square();
        let edges: Vec<_> = fence.edges().collect();
        assert_eq!(edges.len(), 4);
        for i in 0..edges.len() {
            assert_eq!(edges[i].1, edges[(i + 1) % edges.len()].0);
        }
    }

    #[test]
    fn test_independent_cursors() {
        let fence = unit_square();
        let mut first = fence.edges();
        first.next();
        first.next();

        let mut second = fence.edges();
        assert_eq!(second.next().unwrap().0, fence.vertices()[0]);
        second.next();
        second.next();

        assert_eq!(first.next().unwrap().0, fence.vertices()[2]);
    }

    #[test]
    fn test_cursors_across_threads() {
        let fence = unit_square();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| fence.edges().count())).collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), 4);
            }
        });
    }

    #[test]
    fn test_cursor_not_restartable() {
        let fence = unit_square();
        let mut edges = fence.edges();
        assert_eq!(edges.by_ref().count(), 4);
        assert!(edges.next().is_none());
        assert!(edges.next().is_none());
    }
}
