use cube_core::Unit;

use crate::celestial::CelestialWcs;
use crate::error::{WcsError, WcsResult};
use crate::linear::{LinearTransform, MatrixSpec};
use crate::projection::{CoordType, Projection};

/// Builds a [`CelestialWcs`] from parameters rather than metadata.
///
/// Pairs are given as `(y, x)`, matching the rest of the public API. When
/// no reference pixel is set it defaults to the centre of `shape`, or to
/// `(1, 1)` without a shape.
#[derive(Debug, Clone, Default)]
pub struct CelestialWcsBuilder {
    crpix: Option<[f64; 2]>,
    crval: Option<[f64; 2]>,
    cdelt: Option<[f64; 2]>,
    rotation_deg: f64,
    cd: Option<[[f64; 2]; 2]>,
    shape: Option<[usize; 2]>,
    angular: bool,
    frame: CoordType,
    unit: Option<Unit>,
}

impl CelestialWcsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1-based reference pixel.
    pub fn crpix(mut self, y: f64, x: f64) -> Self {
        self.crpix = Some([y, x]);
        self
    }

    pub fn crval(mut self, y: f64, x: f64) -> Self {
        self.crval = Some([y, x]);
        self
    }

    pub fn cdelt(mut self, y: f64, x: f64) -> Self {
        self.cdelt = Some([y, x]);
        self
    }

    /// Grid rotation in degrees. Ignored when a CD matrix is given.
    pub fn rotation(mut self, deg: f64) -> Self {
        self.rotation_deg = deg;
        self
    }

    pub fn cd_matrix(mut self, cd: [[f64; 2]; 2]) -> Self {
        self.cd = Some(cd);
        self
    }

    pub fn shape(mut self, ny: usize, nx: usize) -> Self {
        self.shape = Some([ny, nx]);
        self
    }

    /// Gnomonic sky coordinates instead of a linear plane.
    pub fn angular(mut self, angular: bool) -> Self {
        self.angular = angular;
        self
    }

    pub fn frame(mut self, frame: CoordType) -> Self {
        self.frame = frame;
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn build(self) -> WcsResult<CelestialWcs> {
        let crpix = match (self.crpix, self.shape) {
            (Some([y, x]), _) => [x, y],
            (None, Some([ny, nx])) => [(nx as f64 + 1.0) / 2.0, (ny as f64 + 1.0) / 2.0],
            (None, None) => [1.0, 1.0],
        };

        let matrix = match self.cd {
            Some(cd) => MatrixSpec::Cd(cd),
            None => {
                let [cy, cx] = self.cdelt.unwrap_or([1.0, 1.0]);
                MatrixSpec::CdeltCrota {
                    cdelt: [cx, cy],
                    crota_deg: self.rotation_deg,
                }
            }
        };

        let (projection, default_unit) = if self.angular {
            (Projection::Tangent(self.frame), Unit::degree())
        } else {
            (Projection::Linear, Unit::pixel())
        };
        let unit = self.unit.unwrap_or(default_unit);
        if self.angular && !unit.is_angle() {
            return Err(WcsError::invalid_parameter(format!(
                "a projected system needs an angular unit, got '{unit}'"
            )));
        }

        let crval = self.crval.map(|[y, x]| [x, y]).unwrap_or([0.0, 0.0]);
        let naxis = self.shape.map(|[ny, nx]| [nx, ny]).unwrap_or([0, 0]);
        let linear = LinearTransform::from_spec(crpix, &matrix)?;

        tracing::debug!(
            representation = matrix.name(),
            ?projection,
            unit = %unit,
            "spatial coordinate system built from parameters"
        );
        Ok(CelestialWcs::from_parts(linear, crval, projection, unit, naxis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_builder_defaults() {
        let builder = CelestialWcsBuilder::new();
        assert!(builder.crpix.is_none());
        assert!(builder.crval.is_none());
        assert!(builder.cd.is_none());
        assert!(!builder.angular);

        let wcs = builder.build().unwrap();
        assert_eq!(wcs.crpix1(), 1.0);
        assert_eq!(wcs.crpix2(), 1.0);
        assert_eq!(wcs.cd_matrix(), [[1.0, 0.0], [0.0, 1.0]]);
        assert_eq!(wcs.unit(), &Unit::pixel());
        assert_eq!(wcs.naxis1(), 0);
        assert_eq!(wcs.projection(), Projection::Linear);
    }

    #[test]
    fn test_builder_centres_crpix_on_shape() {
        let wcs = CelestialWcsBuilder::new().shape(5, 6).build().unwrap();
        assert_eq!(wcs.crpix1(), 3.5);
        assert_eq!(wcs.crpix2(), 3.0);
        assert_eq!(wcs.naxis1(), 6);
        assert_eq!(wcs.naxis2(), 5);
    }

    #[test]
    fn test_builder_cdelt_and_rotation() {
        let wcs = CelestialWcsBuilder::new()
            .cdelt(2.0, 3.0)
            .rotation(30.0)
            .build()
            .unwrap();
        let (s, c) = 30.0_f64.to_radians().sin_cos();
        let cd = wcs.cd_matrix();
        assert_abs_diff_eq!(cd[0][0], 3.0 * c, epsilon = 1e-12);
        assert_abs_diff_eq!(cd[0][1], -2.0 * s, epsilon = 1e-12);
        assert_abs_diff_eq!(cd[1][0], 3.0 * s, epsilon = 1e-12);
        assert_abs_diff_eq!(cd[1][1], 2.0 * c, epsilon = 1e-12);
        assert_abs_diff_eq!(wcs.rotation(None).unwrap(), 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_builder_angular() {
        let wcs = CelestialWcsBuilder::new()
            .angular(true)
            .frame(CoordType::Galactic)
            .crval(10.0, 20.0)
            .cdelt(1.0 / 3600.0, -1.0 / 3600.0)
            .build()
            .unwrap();
        assert!(wcs.is_angular());
        assert_eq!(wcs.unit(), &Unit::degree());
        assert_eq!(wcs.projection(), Projection::Tangent(CoordType::Galactic));
        let start = wcs.start(None).unwrap();
        assert_abs_diff_eq!(start[0], 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(start[1], 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_builder_cd_overrides_cdelt() {
        let cd = [[0.0, -2.0], [2.0, 0.0]];
        let wcs = CelestialWcsBuilder::new()
            .cdelt(5.0, 5.0)
            .rotation(10.0)
            .cd_matrix(cd)
            .build()
            .unwrap();
        assert_eq!(wcs.cd_matrix(), cd);
    }

    #[test]
    fn test_builder_errors() {
        let err = CelestialWcsBuilder::new()
            .angular(true)
            .unit(Unit::nanometre())
            .build()
            .unwrap_err();
        assert!(matches!(err, WcsError::InvalidParameter { .. }));

        let err = CelestialWcsBuilder::new().cdelt(0.0, 1.0).build().unwrap_err();
        assert!(matches!(err, WcsError::NoStandardCoordinateSystem { .. }));
    }
}
