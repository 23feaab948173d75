use std::f64::consts::PI;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// Default number of decimals used when formatting a coordinate.
pub const DEFAULT_PRECISION: usize = 6;

/// Tolerance (radians) for [`LatLng::almost_equals`].
pub const EPSILON_RAD: f64 = 1e-9;

const DEGS_PER_RAD: f64 = 180.0 / PI;

/// Angular unit a [`LatLng`] is expressed in.
pub trait AngleUnit: Copy + Default + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Convert a value in this unit to radians.
    fn to_radians(value: f64) -> f64;
    /// Convert a value in radians to this unit.
    fn from_radians(value: f64) -> f64;
}

/// Radians, the canonical internal unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Radians;

/// Degrees, the external-facing view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Degrees;

impl AngleUnit for Radians {
    fn to_radians(value: f64) -> f64 {
        value
    }

    fn from_radians(value: f64) -> f64 {
        value
    }
}

impl AngleUnit for Degrees {
    fn to_radians(value: f64) -> f64 {
        value / DEGS_PER_RAD
    }

    fn from_radians(value: f64) -> f64 {
        value * DEGS_PER_RAD
    }
}

/// A latitude/longitude pair tagged with its angular unit.
///
/// A plain `Copy` value with public fields. Unit conversions never modify
/// the receiver; they return a new coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng<U: AngleUnit = Radians> {
    pub lat: f64,
    pub lon: f64,
    #[serde(skip)]
    unit: PhantomData<U>,
}

impl LatLng<Radians> {
    /// Build a coordinate from degrees, stored as radians.
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        LatLng::<Degrees>::new(lat, lon).to_radians()
    }

    pub fn from_radians(lat: f64, lon: f64) -> Self {
        Self::new(lat, lon)
    }
}

impl<U: AngleUnit> LatLng<U> {
    /// Store `lat`/`lon` as given, in unit `U`.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            unit: PhantomData,
        }
    }

    /// Degree view, with longitude wrapped into (-180, 180] and latitude
    /// into [-90, 90].
    pub fn to_degrees(&self) -> LatLng<Degrees> {
        let lat = Degrees::from_radians(U::to_radians(self.lat));
        let lon = Degrees::from_radians(U::to_radians(self.lon));
        LatLng::new(
            normalize_symmetric(lat, 90.0, true),
            normalize_symmetric(lon, 180.0, false),
        )
    }

    pub fn to_radians(&self) -> LatLng<Radians> {
        LatLng::new(U::to_radians(self.lat), U::to_radians(self.lon))
    }

    /// Compare the radian views of two coordinates within [`EPSILON_RAD`].
    pub fn almost_equals<V: AngleUnit>(&self, other: &LatLng<V>) -> bool {
        let a = self.to_radians();
        let b = other.to_radians();
        (a.lat - b.lat).abs() < EPSILON_RAD && (a.lon - b.lon).abs() < EPSILON_RAD
    }
}

/// Formats as `lat,lon` with [`DEFAULT_PRECISION`] decimals unless the
/// formatter carries its own precision (`{:.2}`).
impl<U: AngleUnit> fmt::Display for LatLng<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        write!(f, "{:.*},{:.*}", precision, self.lat, precision, self.lon)
    }
}

/// Wrap `value` into (-half_range, half_range].
///
/// With `closed` set, values already in [-half_range, half_range] are kept
/// as they are, so the lower bound stays reachable (latitude -90°).
pub fn normalize_symmetric(value: f64, half_range: f64, closed: bool) -> f64 {
    if closed && value.abs() <= half_range {
        return value;
    }
    let wrapped = (value + half_range).rem_euclid(2.0 * half_range) - half_range;
    if wrapped <= -half_range {
        half_range
    } else {
        wrapped
    }
}
