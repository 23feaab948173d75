//! # geocell I/O
//!
//! GeoJSON export and import for geocell shapes. Writers only touch the
//! core through its read accessors and edge traversal, so any loop kind
//! (cell boundary, geofence, linked loop) serializes the same way.

pub mod options;
pub mod geojson;

pub use options::{GeoJsonOptions, MAX_PRECISION};
pub use geojson::{GeoJsonError, Geometry};
