#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absolute tolerances used by the equality tests.
///
/// Spatial tolerances are in the unit of the system being compared against
/// (`rotation` in degrees), spectral ones in the spectral unit of the left-hand
/// side.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tolerances {
    pub position: f64,
    pub step: f64,
    pub rotation: f64,
    pub same_step: f64,
    pub spectral_value: f64,
    pub spectral_step: f64,
}

impl Tolerances {
    pub const DEFAULT: Self = Self {
        position: 1e-3,
        step: 1e-3,
        rotation: 1e-3,
        same_step: 1e-7,
        spectral_value: 1e-2,
        spectral_step: 1e-2,
    };
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[inline]
pub(crate) fn close(a: f64, b: f64, atol: f64) -> bool {
    (a - b).abs() <= atol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = Tolerances::default();
        assert_eq!(t.position, 1e-3);
        assert_eq!(t.same_step, 1e-7);
        assert_eq!(t.spectral_step, 1e-2);
    }

    #[test]
    fn test_close() {
        assert!(close(1.0, 1.0005, 1e-3));
        assert!(!close(1.0, 1.002, 1e-3));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_config_uses_defaults() {
        let t: Tolerances = serde_json::from_str(r#"{"rotation": 0.01}"#).unwrap();
        assert_eq!(t.rotation, 0.01);
        assert_eq!(t.position, 1e-3);
        assert_eq!(t.spectral_value, 1e-2);
    }
}
