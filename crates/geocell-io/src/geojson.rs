//! GeoJSON Polygon / MultiPolygon geometry objects.
//!
//! Positions are `[lon, lat]` in degrees. Rings are written by walking each
//! loop's edges, so array-backed and linked shapes produce identical output;
//! when rings are closed the closing position is the end of the wraparound
//! edge.

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use geocell_core::{
    AngleUnit, CellBoundary, EdgeLoop, GeoMultiPolygon, GeoPolygon, Geofence, LatLng,
    LinkedGeoPolygon,
};

use crate::options::GeoJsonOptions;

// ── Errors ────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum GeoJsonError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected {expected} geometry, found {found}")]
    UnexpectedGeometry {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid position {index} in ring {ring}: expected [lon, lat], got {len} values")]
    InvalidPosition { ring: usize, index: usize, len: usize },
}

// ── Geometry model ────────────────────────────────────────────────────

/// A GeoJSON position: `[lon, lat]`, optionally followed by altitude.
pub type Position = Vec<f64>;

/// The GeoJSON geometry types this crate produces and accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

impl Geometry {
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
        }
    }
}

// ── Shapes → GeoJSON ──────────────────────────────────────────────────

fn position<U: AngleUnit>(vertex: &LatLng<U>, opts: &GeoJsonOptions) -> Position {
    let degrees = vertex.to_degrees();
    vec![opts.round(degrees.lon), opts.round(degrees.lat)]
}

/// Positions of one ring, in edge order.
pub fn ring_positions<L: EdgeLoop>(ring: &L, opts: &GeoJsonOptions) -> Vec<Position> {
    let mut positions = Vec::new();
    let mut closing = None;
    for (from, to) in ring.edges() {
        positions.push(position(&from, opts));
        closing = Some(to);
    }
    if opts.close_rings {
        if let Some(to) = closing {
            positions.push(position(&to, opts));
        }
    }
    positions
}

pub fn polygon_to_geometry(polygon: &GeoPolygon, opts: &GeoJsonOptions) -> Geometry {
    Geometry::Polygon {
        coordinates: polygon.rings().map(|r| ring_positions(r, opts)).collect(),
    }
}

pub fn multipolygon_to_geometry(multi: &GeoMultiPolygon, opts: &GeoJsonOptions) -> Geometry {
    Geometry::MultiPolygon {
        coordinates: multi
            .polygons()
            .iter()
            .map(|p| p.rings().map(|r| ring_positions(r, opts)).collect())
            .collect(),
    }
}

/// A linked polygon chain always becomes a MultiPolygon, one member per
/// polygon in the chain.
pub fn linked_to_geometry(polygon: &LinkedGeoPolygon, opts: &GeoJsonOptions) -> Geometry {
    Geometry::MultiPolygon {
        coordinates: polygon
            .polygons()
            .map(|p| p.loops().map(|r| ring_positions(r, opts)).collect())
            .collect(),
    }
}

pub fn boundary_to_geometry<U: AngleUnit>(
    boundary: &CellBoundary<U>,
    opts: &GeoJsonOptions,
) -> Geometry {
    Geometry::Polygon {
        coordinates: vec![ring_positions(boundary, opts)],
    }
}

pub fn write_geometry<W: Write>(
    mut writer: W,
    geometry: &Geometry,
    opts: &GeoJsonOptions,
) -> Result<(), GeoJsonError> {
    log::debug!("Writing GeoJSON {}", geometry.kind());
    if opts.pretty {
        serde_json::to_writer_pretty(&mut writer, geometry)?;
    } else {
        serde_json::to_writer(&mut writer, geometry)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_string(geometry: &Geometry, opts: &GeoJsonOptions) -> Result<String, GeoJsonError> {
    let json = if opts.pretty {
        serde_json::to_string_pretty(geometry)?
    } else {
        serde_json::to_string(geometry)?
    };
    Ok(json)
}

// ── GeoJSON → Shapes ──────────────────────────────────────────────────

pub fn read_geometry<R: Read>(reader: R) -> Result<Geometry, GeoJsonError> {
    let geometry: Geometry = serde_json::from_reader(reader)?;
    log::debug!("Read GeoJSON {}", geometry.kind());
    Ok(geometry)
}

pub fn from_str(json: &str) -> Result<Geometry, GeoJsonError> {
    let geometry: Geometry = serde_json::from_str(json)?;
    log::debug!("Parsed GeoJSON {}", geometry.kind());
    Ok(geometry)
}

/// Parse a ring, dropping the closing duplicate of its first position.
fn parse_ring(ring_index: usize, positions: &[Position]) -> Result<Geofence, GeoJsonError> {
    let mut verts = positions
        .iter()
        .enumerate()
        .map(|(index, pos)| match pos.as_slice() {
            [lon, lat, ..] => Ok(LatLng::from_degrees(*lat, *lon)),
            _ => Err(GeoJsonError::InvalidPosition {
                ring: ring_index,
                index,
                len: pos.len(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if verts.len() > 1 && verts.first() == verts.last() {
        verts.pop();
    }
    Ok(Geofence::new(verts))
}

fn parse_polygon(rings: &[Vec<Position>]) -> Result<GeoPolygon, GeoJsonError> {
    let Some((exterior, holes)) = rings.split_first() else {
        return Ok(GeoPolygon::default());
    };

    let geofence = parse_ring(0, exterior)?;
    let mut parsed = Vec::with_capacity(holes.len());
    for (i, hole) in holes.iter().enumerate() {
        let ring = parse_ring(i + 1, hole)?;
        if ring.is_empty() {
            log::warn!("Dropping empty hole ring {}", i + 1);
            continue;
        }
        parsed.push(ring);
    }
    Ok(GeoPolygon::with_holes(geofence, parsed))
}

pub fn geometry_to_polygon(geometry: &Geometry) -> Result<GeoPolygon, GeoJsonError> {
    match geometry {
        Geometry::Polygon { coordinates } => parse_polygon(coordinates),
        other => Err(GeoJsonError::UnexpectedGeometry {
            expected: "Polygon",
            found: other.kind(),
        }),
    }
}

/// Accepts either geometry type; a Polygon becomes a one-member MultiPolygon.
pub fn geometry_to_multipolygon(geometry: &Geometry) -> Result<GeoMultiPolygon, GeoJsonError> {
    match geometry {
        Geometry::Polygon { coordinates } => {
            Ok(GeoMultiPolygon::new(vec![parse_polygon(coordinates)?]))
        }
        Geometry::MultiPolygon { coordinates } => coordinates
            .iter()
            .map(|rings| parse_polygon(rings))
            .collect::<Result<Vec<_>, _>>()
            .map(GeoMultiPolygon::new),
    }
}
