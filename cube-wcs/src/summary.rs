//! Human-readable one-line descriptions of coordinate systems.

use std::fmt;

/// Description of a spatial system, see [`CelestialWcs::summary`].
///
/// [`CelestialWcs::summary`]: crate::CelestialWcs::summary
#[derive(Debug, Clone, PartialEq)]
pub enum CelestialSummary {
    /// Sky systems: centre in sexagesimal, extents in arcseconds.
    Sky {
        center: [String; 2],
        size_arcsec: [f64; 2],
        step_arcsec: [f64; 2],
        rotation_deg: f64,
    },
    /// Linear systems: corner values in the system unit.
    Plane {
        unit: String,
        start: [f64; 2],
        end: [f64; 2],
        step: [f64; 2],
        rotation_deg: f64,
    },
}

impl fmt::Display for CelestialSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sky {
                center,
                size_arcsec,
                step_arcsec,
                rotation_deg,
            } => write!(
                f,
                "center:({},{}) size in arcsec:({:.3},{:.3}) step in arcsec:({:.3},{:.3}) rot:{:.1} deg",
                center[0],
                center[1],
                size_arcsec[0],
                size_arcsec[1],
                step_arcsec[0],
                step_arcsec[1],
                rotation_deg
            ),
            Self::Plane {
                unit,
                start,
                end,
                step,
                rotation_deg,
            } => write!(
                f,
                "spatial coord ({unit}): min:({:.1},{:.1}) max:({:.1},{:.1}) step:({:.1},{:.1}) rot:{:.1} deg",
                start[0], start[1], end[0], end[1], step[0], step[1], rotation_deg
            ),
        }
    }
}

/// Description of a spectral axis, see [`SpectralWcs::summary`].
///
/// [`SpectralWcs::summary`]: crate::SpectralWcs::summary
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralSummary {
    pub start: f64,
    pub end: Option<f64>,
    pub step: f64,
    pub unit: String,
}

impl fmt::Display for SpectralSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(
                f,
                "wavelength: min:{:.2} max:{:.2} step:{:.2} {}",
                self.start, end, self.step, self.unit
            ),
            None => write!(
                f,
                "wavelength: min:{:.2} step:{:.2} {}",
                self.start, self.step, self.unit
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectral_display() {
        let summary = SpectralSummary {
            start: 4750.0,
            end: Some(9350.0),
            step: 1.25,
            unit: "Angstrom".into(),
        };
        assert_eq!(
            summary.to_string(),
            "wavelength: min:4750.00 max:9350.00 step:1.25 Angstrom"
        );
    }

    #[test]
    fn test_spectral_display_without_length() {
        let summary = SpectralSummary {
            start: 1.0,
            end: None,
            step: 1.0,
            unit: "nm".into(),
        };
        assert_eq!(summary.to_string(), "wavelength: min:1.00 step:1.00 nm");
    }

    #[test]
    fn test_plane_display() {
        let summary = CelestialSummary::Plane {
            unit: "pixel".into(),
            start: [-2.0, -2.5],
            end: [2.0, 2.5],
            step: [1.0, 1.0],
            rotation_deg: 0.0,
        };
        assert_eq!(
            summary.to_string(),
            "spatial coord (pixel): min:(-2.0,-2.5) max:(2.0,2.5) step:(1.0,1.0) rot:0.0 deg"
        );
    }

    #[test]
    fn test_sky_display() {
        let summary = CelestialSummary::Sky {
            center: ["-60:34:05.710".into(), "22:32:55.417".into()],
            size_arcsec: [60.0, 60.0],
            step_arcsec: [0.2, 0.2],
            rotation_deg: 0.0,
        };
        assert_eq!(
            summary.to_string(),
            "center:(-60:34:05.710,22:32:55.417) size in arcsec:(60.000,60.000) \
             step in arcsec:(0.200,0.200) rot:0.0 deg"
        );
    }
}
