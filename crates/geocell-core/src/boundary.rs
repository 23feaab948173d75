use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::edges::{EdgeLoop, SliceEdges};
use crate::latlng::{AngleUnit, Degrees, LatLng, Radians};

/// Maximum number of cell boundary vertices. The worst case is a pentagon:
/// 5 original vertices plus 5 edge crossings.
pub const MAX_CELL_BNDRY_VERTS: usize = 10;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundaryError {
    #[error("Cell boundary has {count} vertices, at most {max} are allowed")]
    TooManyVertices { count: usize, max: usize },
}

/// A cell boundary: a fixed-capacity closed loop in counter-clockwise order.
///
/// Only the first `num_verts` entries of the backing array are meaningful.
/// The closing edge from the last vertex back to the first is implicit.
/// Serializes as the plain vertex list; deserializing goes through
/// [`CellBoundary::from_vertices`], so the vertex limit is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LatLng<U>>", into = "Vec<LatLng<U>>")]
pub struct CellBoundary<U: AngleUnit = Radians> {
    num_verts: usize,
    verts: [LatLng<U>; MAX_CELL_BNDRY_VERTS],
}

impl<U: AngleUnit> CellBoundary<U> {
    /// Copy `verts` into a new boundary.
    pub fn from_vertices(verts: &[LatLng<U>]) -> Result<Self, BoundaryError> {
        if verts.len() > MAX_CELL_BNDRY_VERTS {
            return Err(BoundaryError::TooManyVertices {
                count: verts.len(),
                max: MAX_CELL_BNDRY_VERTS,
            });
        }

        let mut boundary = Self::default();
        boundary.verts[..verts.len()].copy_from_slice(verts);
        boundary.num_verts = verts.len();
        Ok(boundary)
    }

    pub fn vertices(&self) -> &[LatLng<U>] {
        &self.verts[..self.num_verts]
    }

    pub fn vertex_count(&self) -> usize {
        self.num_verts
    }

    pub fn is_empty(&self) -> bool {
        self.num_verts == 0
    }

    pub fn to_degrees(&self) -> CellBoundary<Degrees> {
        self.map_vertices(|v| v.to_degrees())
    }

    pub fn to_radians(&self) -> CellBoundary<Radians> {
        self.map_vertices(|v| v.to_radians())
    }

    fn map_vertices<V: AngleUnit>(&self, f: impl Fn(&LatLng<U>) -> LatLng<V>) -> CellBoundary<V> {
        let mut out = CellBoundary::<V>::default();
        for (dst, src) in out.verts.iter_mut().zip(self.vertices()) {
            *dst = f(src);
        }
        out.num_verts = self.num_verts;
        out
    }
}

impl<U: AngleUnit> Default for CellBoundary<U> {
    fn default() -> Self {
        Self {
            num_verts: 0,
            verts: [LatLng::default(); MAX_CELL_BNDRY_VERTS],
        }
    }
}

impl<U: AngleUnit> TryFrom<&[LatLng<U>]> for CellBoundary<U> {
    type Error = BoundaryError;

    fn try_from(verts: &[LatLng<U>]) -> Result<Self, Self::Error> {
        Self::from_vertices(verts)
    }
}

impl<U: AngleUnit> TryFrom<Vec<LatLng<U>>> for CellBoundary<U> {
    type Error = BoundaryError;

    fn try_from(verts: Vec<LatLng<U>>) -> Result<Self, Self::Error> {
        Self::from_vertices(&verts)
    }
}

impl<U: AngleUnit> From<CellBoundary<U>> for Vec<LatLng<U>> {
    fn from(boundary: CellBoundary<U>) -> Self {
        boundary.vertices().to_vec()
    }
}

impl<U: AngleUnit> EdgeLoop for CellBoundary<U> {
    type Unit = U;
    type Edges<'a> = SliceEdges<'a, U>;

    fn edges(&self) -> Self::Edges<'_> {
        SliceEdges::new(self.vertices())
    }

    fn is_empty(&self) -> bool {
        self.num_verts == 0
    }
}

/// Formats as `[lat,lon lat,lon ...]`.
impl<U: AngleUnit> fmt::Display for CellBoundary<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.vertices().iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(v, f)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pentagon_degrees() -> Vec<LatLng<Degrees>> {
        vec![
            LatLng::new(10.0, 10.0),
            LatLng::new(12.0, 14.0),
            LatLng::new(15.0, 12.0),
            LatLng::new(14.0, 8.0),
            LatLng::new(11.0, 7.0),
        ]
    }

    #[test]
    fn test_boundary_holds_vertices() {
        let verts = pentagon_degrees();
        let boundary = CellBoundary::from_vertices(&verts).unwrap();
        assert_eq!(boundary.vertex_count(), 5);
        assert_eq!(boundary.vertices(), verts.as_slice());
        assert!(!boundary.is_empty());
    }

    #[test]
    fn test_boundary_rejects_overflow() {
        let verts = vec![LatLng::from_radians(0.1, 0.1); MAX_CELL_BNDRY_VERTS + 1];
        let err = CellBoundary::from_vertices(&verts).unwrap_err();
        assert_eq!(err, BoundaryError::TooManyVertices { count: 11, max: 10 });
    }

    #[test]
    fn test_boundary_accepts_full_capacity() {
        let verts = vec![LatLng::from_radians(0.1, 0.1); MAX_CELL_BNDRY_VERTS];
        let boundary = CellBoundary::try_from(verts.as_slice()).unwrap();
        assert_eq!(boundary.edges().count(), MAX_CELL_BNDRY_VERTS);
    }

    #[test]
    fn test_empty_boundary_has_no_edges() {
        let boundary = CellBoundary::<Radians>::default();
        assert!(boundary.is_empty());
        assert_eq!(boundary.edges().next(), None);
    }

    #[test]
    fn test_boundary_edges_close_loop() {
        let verts = pentagon_degrees();
        let boundary = CellBoundary::from_vertices(&verts).unwrap();
        let last = boundary.edges().last().unwrap();
        assert_eq!(last, (verts[4], verts[0]));
    }

    #[test]
    fn test_boundary_unit_conversions_are_distinct() {
        let degrees = CellBoundary::from_vertices(&pentagon_degrees()).unwrap();
        let radians = degrees.to_radians();
        assert!((radians.vertices()[0].lat - 10.0_f64.to_radians()).abs() < 1e-12);

        let back = radians.to_degrees();
        for (a, b) in back.vertices().iter().zip(degrees.vertices()) {
            assert!((a.lat - b.lat).abs() < 1e-9);
            assert!((a.lon - b.lon).abs() < 1e-9);
        }
    }

    #[test]
    fn test_boundary_serde_is_vertex_list() {
        let verts = [LatLng::<Degrees>::new(1.0, 2.0), LatLng::new(3.0, 4.0)];
        let boundary = CellBoundary::from_vertices(&verts).unwrap();
        let json = serde_json::to_string(&boundary).unwrap();
        assert_eq!(json, r#"[{"lat":1.0,"lon":2.0},{"lat":3.0,"lon":4.0}]"#);

        let back: CellBoundary<Degrees> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, boundary);
        assert_eq!(back.vertex_count(), 2);
    }

    #[test]
    fn test_boundary_deserialize_rejects_overflow() {
        let verts = vec![LatLng::from_radians(0.1, 0.1); MAX_CELL_BNDRY_VERTS + 1];
        let json = serde_json::to_string(&verts).unwrap();
        let err = serde_json::from_str::<CellBoundary>(&json).unwrap_err();
        assert!(err.to_string().contains("11 vertices"));
    }

    #[test]
    fn test_boundary_deserialize_ignores_stale_layout() {
        // Only the vertex list form is accepted, never a caller-supplied count.
        let json = format!(
            r#"{{"num_verts":11,"verts":{}}}"#,
            serde_json::to_string(&[LatLng::<Radians>::default(); MAX_CELL_BNDRY_VERTS]).unwrap()
        );
        assert!(serde_json::from_str::<CellBoundary>(&json).is_err());
    }

    #[test]
    fn test_boundary_display() {
        let verts = [LatLng::<Degrees>::new(1.0, 2.0), LatLng::new(3.0, 4.0)];
        let boundary = CellBoundary::from_vertices(&verts).unwrap();
        assert_eq!(
            boundary.to_string(),
            "[1.000000,2.000000 3.000000,4.000000]"
        );
        assert_eq!(format!("{:.1}", boundary), "[1.0,2.0 3.0,4.0]");
    }
}
