//! # geocell Core
//!
//! Boundary geometry of hierarchical grid cells: unit-tagged coordinates,
//! fixed-size cell boundaries, array-backed geofences and polygons, and
//! incrementally built linked loops and polygons.
//!
//! Every loop kind implements [`EdgeLoop`], the one contract consumers use
//! to walk a ring edge by edge, wraparound edge included.

pub mod latlng;
pub mod edges;
pub mod boundary;
pub mod geofence;
pub mod polygon;
pub mod linked;

pub use latlng::{AngleUnit, Degrees, LatLng, Radians};
pub use edges::{Edge, EdgeCursor, EdgeLoop, SliceEdges};
pub use boundary::{BoundaryError, CellBoundary, MAX_CELL_BNDRY_VERTS};
pub use geofence::Geofence;
pub use polygon::{GeoMultiPolygon, GeoPolygon};
pub use linked::{LinkedEdges, LinkedGeoLoop, LinkedGeoPolygon, LinkedLatLng};
