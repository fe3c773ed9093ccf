use cube_core::Angle;

use crate::error::{WcsError, WcsResult};

/// A position in FITS pixel convention: 1-based, axis order (x, y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelCoord {
    x: f64,
    y: f64,
}

impl PixelCoord {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// From a 0-based `[row, col]` array index.
    #[inline]
    pub fn from_array_index(index: [f64; 2]) -> Self {
        Self {
            x: index[1] + 1.0,
            y: index[0] + 1.0,
        }
    }

    /// Back to a 0-based `[row, col]` array index.
    #[inline]
    pub fn to_array_index(&self) -> [f64; 2] {
        [self.y - 1.0, self.x - 1.0]
    }
}

/// Offsets from the reference point after the linear transform, in the unit
/// of the coordinate system (degrees for projected systems).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntermediateCoord {
    x: f64,
    y: f64,
}

impl IntermediateCoord {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeCoord {
    phi: Angle,
    theta: Angle,
}

impl NativeCoord {
    #[inline]
    pub fn new(phi: Angle, theta: Angle) -> Self {
        Self { phi, theta }
    }

    #[inline]
    pub fn phi(&self) -> Angle {
        self.phi
    }

    #[inline]
    pub fn theta(&self) -> Angle {
        self.theta
    }
}

/// A sky position: longitude-like `alpha`, latitude-like `delta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialCoord {
    alpha: Angle,
    delta: Angle,
}

impl CelestialCoord {
    #[inline]
    pub fn new(alpha: Angle, delta: Angle) -> Self {
        Self { alpha, delta }
    }

    #[inline]
    pub fn alpha(&self) -> Angle {
        self.alpha
    }

    #[inline]
    pub fn delta(&self) -> Angle {
        self.delta
    }
}

/// Splits a row-major buffer of `width` columns into coordinate pairs.
///
/// Only `width == 2` describes a list of pairs; any other width, or a buffer
/// that does not fill whole rows, is rejected.
pub fn pairs_from_flat(values: &[f64], width: usize) -> WcsResult<Vec<[f64; 2]>> {
    if width != 2 {
        return Err(WcsError::invalid_coordinate_shape(format!(
            "rows of {width} value(s)"
        )));
    }
    if values.len() % 2 != 0 {
        return Err(WcsError::invalid_coordinate_shape(format!(
            "{} value(s), which is not a whole number of pairs",
            values.len()
        )));
    }
    Ok(values.chunks_exact(2).map(|c| [c[0], c[1]]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_index_to_pixel() {
        let p = PixelCoord::from_array_index([0.0, 0.0]);
        assert_eq!(p.x(), 1.0);
        assert_eq!(p.y(), 1.0);

        let p2 = PixelCoord::from_array_index([19.0, 9.0]);
        assert_eq!(p2.x(), 10.0);
        assert_eq!(p2.y(), 20.0);
    }

    #[test]
    fn test_pixel_index_roundtrip() {
        let index = [81.34, 108.41];
        let back = PixelCoord::from_array_index(index).to_array_index();
        assert_eq!(back, index);
    }

    #[test]
    fn test_pairs_from_flat() {
        let pairs = pairs_from_flat(&[0.0, 1.0, 2.0, 3.0], 2).unwrap();
        assert_eq!(pairs, vec![[0.0, 1.0], [2.0, 3.0]]);
        assert!(pairs_from_flat(&[], 2).unwrap().is_empty());
    }

    #[test]
    fn test_pairs_from_flat_rejects_wrong_width() {
        let err = pairs_from_flat(&[0.0, 1.0, 2.0], 3).unwrap_err();
        assert!(matches!(err, WcsError::InvalidCoordinateShape { .. }));
    }

    #[test]
    fn test_pairs_from_flat_rejects_ragged() {
        let err = pairs_from_flat(&[0.0, 1.0, 2.0], 2).unwrap_err();
        assert!(matches!(err, WcsError::InvalidCoordinateShape { .. }));
    }

    #[test]
    fn test_celestial_coord() {
        let c = CelestialCoord::new(Angle::from_degrees(180.0), Angle::from_degrees(45.0));
        assert_eq!(c.alpha().degrees(), 180.0);
        assert_eq!(c.delta().degrees(), 45.0);
    }
}
