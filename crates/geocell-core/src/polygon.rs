use serde::{Deserialize, Serialize};

use crate::geofence::Geofence;

/// An exterior ring plus zero or more holes, the core of a GeoJSON Polygon.
///
/// Holes are expected to lie inside the exterior ring; this is not checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPolygon {
    pub geofence: Geofence,
    pub holes: Vec<Geofence>,
}

impl GeoPolygon {
    pub fn new(geofence: Geofence) -> Self {
        Self {
            geofence,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(geofence: Geofence, holes: Vec<Geofence>) -> Self {
        Self { geofence, holes }
    }

    pub fn exterior(&self) -> &Geofence {
        &self.geofence
    }

    pub fn holes(&self) -> &[Geofence] {
        &self.holes
    }

    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// All rings, exterior first, then holes in order.
    pub fn rings(&self) -> impl Iterator<Item = &Geofence> {
        std::iter::once(&self.geofence).chain(self.holes.iter())
    }
}

/// An ordered collection of polygons, the core of a GeoJSON MultiPolygon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoMultiPolygon {
    pub polygons: Vec<GeoPolygon>,
}

impl GeoMultiPolygon {
    pub fn new(polygons: Vec<GeoPolygon>) -> Self {
        Self { polygons }
    }

    pub fn polygons(&self) -> &[GeoPolygon] {
        &self.polygons
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

impl FromIterator<GeoPolygon> for GeoMultiPolygon {
    fn from_iter<I: IntoIterator<Item = GeoPolygon>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
