//! Index-space bounding boxes of rotated ellipses and rectangles.
//!
//! ```
//! use cube_wcs::bbox::{bounding_box, Radii, RegionShape};
//!
//! let (rows, cols) =
//!     bounding_box(RegionShape::Ellipse, [2.0, 2.0], Radii::Circular(1.0), 0.0, [5, 5], [1.0, 1.0])
//!         .unwrap();
//! assert_eq!(rows, 1..4);
//! assert_eq!(cols, 1..4);
//! ```

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use cube_core::constants::DEG_TO_RAD;

use crate::error::{WcsError, WcsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionShape {
    Rectangle,
    Ellipse,
}

impl FromStr for RegionShape {
    type Err = WcsError;

    fn from_str(s: &str) -> WcsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" => Ok(Self::Rectangle),
            "ellipse" => Ok(Self::Ellipse),
            _ => Err(WcsError::invalid_shape_kind(s)),
        }
    }
}

impl fmt::Display for RegionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
        })
    }
}

/// Half-extents of a region before rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Radii {
    /// Same half-extent along both axes.
    Circular(f64),
    /// `[ry, rx]`: half-height along y and half-width along x.
    Elliptical([f64; 2]),
}

impl Radii {
    /// `[ry, rx]`.
    pub fn pair(&self) -> [f64; 2] {
        match *self {
            Self::Circular(r) => [r, r],
            Self::Elliptical(pair) => pair,
        }
    }
}

impl From<f64> for Radii {
    fn from(r: f64) -> Self {
        Self::Circular(r)
    }
}

impl From<[f64; 2]> for Radii {
    fn from(pair: [f64; 2]) -> Self {
        Self::Elliptical(pair)
    }
}

/// Row and column index ranges that just enclose a region.
///
/// `center` is a fractional `[y, x]` array index, `radii` and `step` share a
/// world unit (use a step of `[1.0, 1.0]` for radii in pixels) and
/// `pa_deg` rotates the region counter-clockwise from the x axis. The ranges
/// are clipped to the array; an axis of length zero gives an empty range.
pub fn bounding_box(
    shape: RegionShape,
    center: [f64; 2],
    radii: Radii,
    pa_deg: f64,
    array_shape: [usize; 2],
    step: [f64; 2],
) -> WcsResult<(Range<usize>, Range<usize>)> {
    if step.iter().any(|s| !s.is_finite() || *s == 0.0) {
        return Err(WcsError::invalid_parameter(format!(
            "pixel step must be finite and nonzero, got {step:?}"
        )));
    }

    let [ry, rx] = radii.pair();
    let (sin_pa, cos_pa) = (pa_deg * DEG_TO_RAD).sin_cos();

    let (xmax, ymax) = match shape {
        RegionShape::Rectangle => (
            (rx * cos_pa).abs() + (ry * sin_pa).abs(),
            (rx * sin_pa).abs() + (ry * cos_pa).abs(),
        ),
        RegionShape::Ellipse => {
            // Parametric angles at which the rotated ellipse reaches its
            // extreme x and y.
            let t_x = libm::atan2(-ry * sin_pa, rx * cos_pa);
            let t_y = libm::atan2(ry * cos_pa, rx * sin_pa);
            (
                (rx * t_x.cos() * cos_pa - ry * t_x.sin() * sin_pa).abs(),
                (rx * t_y.cos() * sin_pa + ry * t_y.sin() * cos_pa).abs(),
            )
        }
    };

    let half = [ymax / step[0], xmax / step[1]];
    let rows = clipped_range(center[0], half[0].abs(), array_shape[0]);
    let cols = clipped_range(center[1], half[1].abs(), array_shape[1]);
    Ok((rows, cols))
}

fn clipped_range(center: f64, half: f64, len: usize) -> Range<usize> {
    if len == 0 {
        return 0..0;
    }
    let max_index = len as i64 - 1;
    let lo = ((center - half).trunc() as i64).clamp(0, max_index) as usize;
    let hi = ((center + half).trunc() as i64).clamp(0, max_index) as usize;
    lo..hi + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_in_pixels() {
        let (rows, cols) =
            bounding_box(RegionShape::Ellipse, [2.0, 2.0], Radii::Circular(1.0), 0.0, [5, 5], [1.0, 1.0])
                .unwrap();
        assert_eq!(rows, 1..4);
        assert_eq!(cols, 1..4);
    }

    #[test]
    fn test_unrotated_ellipse_uses_y_then_x() {
        let (rows, cols) = bounding_box(
            RegionShape::Ellipse,
            [10.0, 10.0],
            Radii::Elliptical([2.0, 5.0]),
            0.0,
            [30, 30],
            [1.0, 1.0],
        )
        .unwrap();
        assert_eq!(rows, 8..13);
        assert_eq!(cols, 5..16);
    }

    #[test]
    fn test_ellipse_rotated_quarter_turn_swaps_axes() {
        let (rows, cols) = bounding_box(
            RegionShape::Ellipse,
            [10.0, 10.0],
            Radii::Elliptical([2.0, 5.0]),
            90.0,
            [30, 30],
            [1.0, 1.0],
        )
        .unwrap();
        assert_eq!(rows, 5..16);
        assert_eq!(cols, 8..13);
    }

    #[test]
    fn test_rotated_rectangle() {
        // A unit-radius square rotated by 45 degrees reaches sqrt(2) from its centre.
        let (rows, cols) = bounding_box(
            RegionShape::Rectangle,
            [10.0, 10.0],
            Radii::Circular(1.0),
            45.0,
            [30, 30],
            [1.0, 1.0],
        )
        .unwrap();
        assert_eq!(rows, 8..12);
        assert_eq!(cols, 8..12);
    }

    #[test]
    fn test_world_radii_divided_by_step() {
        let (rows, cols) = bounding_box(
            RegionShape::Rectangle,
            [50.0, 50.0],
            Radii::Elliptical([2.0, 4.0]),
            0.0,
            [100, 100],
            [0.2, 0.4],
        )
        .unwrap();
        assert_eq!(rows, 40..61);
        assert_eq!(cols, 40..61);
    }

    #[test]
    fn test_clipped_to_array() {
        let (rows, cols) = bounding_box(
            RegionShape::Ellipse,
            [0.5, 9.0],
            Radii::Circular(3.0),
            0.0,
            [5, 10],
            [1.0, 1.0],
        )
        .unwrap();
        assert_eq!(rows, 0..4);
        assert_eq!(cols, 6..10);
    }

    #[test]
    fn test_empty_axis() {
        let (rows, cols) =
            bounding_box(RegionShape::Ellipse, [0.0, 0.0], Radii::Circular(1.0), 0.0, [0, 4], [1.0, 1.0])
                .unwrap();
        assert!(rows.is_empty());
        assert_eq!(cols, 0..2);
    }

    #[test]
    fn test_region_shape_from_str() {
        assert_eq!("ellipse".parse::<RegionShape>().unwrap(), RegionShape::Ellipse);
        assert_eq!("Rectangle".parse::<RegionShape>().unwrap(), RegionShape::Rectangle);
        let err = "polygon".parse::<RegionShape>().unwrap_err();
        assert!(matches!(err, WcsError::InvalidShapeKind { .. }));
    }

    #[test]
    fn test_zero_step_rejected() {
        let result =
            bounding_box(RegionShape::Ellipse, [1.0, 1.0], Radii::Circular(1.0), 0.0, [4, 4], [0.0, 1.0]);
        assert!(matches!(result, Err(WcsError::InvalidParameter { .. })));
    }
}
