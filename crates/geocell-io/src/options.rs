use serde::{Deserialize, Serialize};

/// Decimals beyond this carry no information in an `f64`; larger
/// precisions are clamped to it.
pub const MAX_PRECISION: u32 = 17;

/// Settings for GeoJSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoJsonOptions {
    /// Repeat each ring's first position at its end, as RFC 7946 requires.
    pub close_rings: bool,
    /// Round coordinates to this many decimals, at most [`MAX_PRECISION`].
    pub precision: Option<u32>,
    /// Pretty-print when writing.
    pub pretty: bool,
}

impl Default for GeoJsonOptions {
    fn default() -> Self {
        Self {
            close_rings: true,
            precision: None,
            pretty: false,
        }
    }
}

impl GeoJsonOptions {
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_close_rings(mut self, close_rings: bool) -> Self {
        self.close_rings = close_rings;
        self
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub(crate) fn round(&self, value: f64) -> f64 {
        match self.precision {
            Some(p) => {
                // At most MAX_PRECISION, so the cast cannot wrap.
                let scale = 10f64.powi(p.min(MAX_PRECISION) as i32);
                (value * scale).round() / scale
            }
            None => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_close_rings() {
        let opts = GeoJsonOptions::default();
        assert!(opts.close_rings);
        assert!(opts.precision.is_none());
        assert!(!opts.pretty);
    }

    #[test]
    fn test_round_to_precision() {
        let opts = GeoJsonOptions::default().with_precision(2);
        assert!((opts.round(1.23456) - 1.23).abs() < 1e-12);
        assert_eq!(GeoJsonOptions::default().round(1.23456), 1.23456);
    }

    #[test]
    fn test_huge_precision_is_clamped() {
        for p in [MAX_PRECISION, 400, i32::MAX as u32 + 1, u32::MAX] {
            let opts = GeoJsonOptions::default().with_precision(p);
            let rounded = opts.round(-122.41795063018799);
            assert!(rounded.is_finite(), "precision {} gave {}", p, rounded);
            assert!((rounded + 122.41795063018799).abs() < 1e-9);
        }
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let opts: GeoJsonOptions = serde_json::from_str(r#"{"precision": 5}"#).unwrap();
        assert_eq!(opts.precision, Some(5));
        assert!(opts.close_rings);
    }
}
