//! The [`Angle`] type.
//!
//! Sky coordinates in this workspace are carried as plain `f64` values in the
//! unit of their coordinate system; `Angle` is used where a value has to be
//! interpreted as an angle regardless of that unit, chiefly for the
//! tangent-plane projection and for sexagesimal notation.
//!
//! ```
//! use cube_core::Angle;
//!
//! let ra = Angle::from_hours(6.0);
//! assert!((ra.degrees() - 90.0).abs() < 1e-12);
//! ```

use crate::constants::{DEG_PER_HOUR, DEG_TO_RAD, RAD_TO_DEG};

/// An angle stored in degrees.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Angle {
    deg: f64,
}

impl Angle {
    pub const ZERO: Self = Self { deg: 0.0 };

    #[inline]
    pub const fn from_degrees(deg: f64) -> Self {
        Self { deg }
    }

    #[inline]
    pub fn from_radians(rad: f64) -> Self {
        Self {
            deg: rad * RAD_TO_DEG,
        }
    }

    #[inline]
    pub fn from_hours(hours: f64) -> Self {
        Self {
            deg: hours * DEG_PER_HOUR,
        }
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.deg
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.deg * DEG_TO_RAD
    }

    #[inline]
    pub fn hours(self) -> f64 {
        self.deg / DEG_PER_HOUR
    }

    #[inline]
    pub fn sin_cos(self) -> (f64, f64) {
        self.radians().sin_cos()
    }

    /// Wraps the angle into `[0, 360)` degrees.
    #[inline]
    pub fn wrapped(self) -> Self {
        let deg = self.deg.rem_euclid(360.0);
        // rem_euclid can return exactly 360.0 for tiny negative inputs
        Self {
            deg: if deg >= 360.0 { 0.0 } else { deg },
        }
    }
}
