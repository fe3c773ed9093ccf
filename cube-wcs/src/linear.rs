use cube_core::constants::DEG_TO_RAD;

use crate::coordinate::{IntermediateCoord, PixelCoord};
use crate::error::{WcsError, WcsResult};

/// Relative size below which the determinant counts as zero.
const DETERMINANT_THRESHOLD: f64 = 1e-15;

/// The ways a metadata record can describe the pixel-to-world matrix.
///
/// Every form is resolved once into the canonical CD matrix; nothing else in
/// the crate looks at the header form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatrixSpec {
    Cd([[f64; 2]; 2]),
    PcCdelt { pc: [[f64; 2]; 2], cdelt: [f64; 2] },
    CdeltCrota { cdelt: [f64; 2], crota_deg: f64 },
}

impl MatrixSpec {
    pub fn resolve(&self) -> [[f64; 2]; 2] {
        match *self {
            Self::Cd(cd) => cd,
            Self::PcCdelt { pc, cdelt } => [
                [cdelt[0] * pc[0][0], cdelt[0] * pc[0][1]],
                [cdelt[1] * pc[1][0], cdelt[1] * pc[1][1]],
            ],
            Self::CdeltCrota { cdelt, crota_deg } => {
                let (s, c) = (crota_deg * DEG_TO_RAD).sin_cos();
                [
                    [cdelt[0] * c, -cdelt[1] * s],
                    [cdelt[0] * s, cdelt[1] * c],
                ]
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cd(_) => "CD",
            Self::PcCdelt { .. } => "PC+CDELT",
            Self::CdeltCrota { .. } => "CDELT+CROTA2",
        }
    }
}

/// Affine map between FITS pixel positions and intermediate world offsets.
///
/// Axes are in FITS order: index 0 is x (axis 1), index 1 is y (axis 2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTransform {
    crpix: [f64; 2],
    cd: [[f64; 2]; 2],
    cd_inverse: [[f64; 2]; 2],
    determinant: f64,
}

impl LinearTransform {
    pub fn from_cd(crpix: [f64; 2], cd: [[f64; 2]; 2]) -> WcsResult<Self> {
        if cd.iter().flatten().any(|v| !v.is_finite()) {
            return Err(WcsError::no_standard_wcs(format!(
                "transform matrix {cd:?} has non-finite elements"
            )));
        }
        let determinant = cd[0][0] * cd[1][1] - cd[0][1] * cd[1][0];
        let magnitude = cd.iter().flatten().fold(0.0_f64, |m, v| m.max(v.abs()));
        if determinant == 0.0 || determinant.abs() < DETERMINANT_THRESHOLD * magnitude * magnitude {
            return Err(WcsError::no_standard_wcs(format!(
                "transform matrix {cd:?} is singular (determinant {determinant:e})"
            )));
        }
        let cd_inverse = compute_inverse(cd, determinant);
        Ok(Self {
            crpix,
            cd,
            cd_inverse,
            determinant,
        })
    }

    pub fn from_spec(crpix: [f64; 2], spec: &MatrixSpec) -> WcsResult<Self> {
        Self::from_cd(crpix, spec.resolve())
    }

    pub fn pixel_to_intermediate(&self, pixel: PixelCoord) -> IntermediateCoord {
        let d0 = pixel.x() - self.crpix[0];
        let d1 = pixel.y() - self.crpix[1];
        let x = self.cd[0][0] * d0 + self.cd[0][1] * d1;
        let y = self.cd[1][0] * d0 + self.cd[1][1] * d1;
        IntermediateCoord::new(x, y)
    }

    pub fn intermediate_to_pixel(&self, inter: IntermediateCoord) -> PixelCoord {
        let x = inter.x();
        let y = inter.y();
        let px = self.cd_inverse[0][0] * x + self.cd_inverse[0][1] * y + self.crpix[0];
        let py = self.cd_inverse[1][0] * x + self.cd_inverse[1][1] * y + self.crpix[1];
        PixelCoord::new(px, py)
    }

    #[inline]
    pub fn crpix(&self) -> [f64; 2] {
        self.crpix
    }

    #[inline]
    pub fn cd_matrix(&self) -> [[f64; 2]; 2] {
        self.cd
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.determinant
    }

    /// Size of one pixel along each world axis: the row norms `[dx, dy]`.
    pub fn axis_steps(&self) -> [f64; 2] {
        [
            libm::hypot(self.cd[0][0], self.cd[0][1]),
            libm::hypot(self.cd[1][0], self.cd[1][1]),
        ]
    }

    /// Rotation of the pixel grid, in radians.
    pub fn rotation_rad(&self) -> f64 {
        libm::atan2(self.cd[1][0], self.cd[1][1])
    }

    pub fn with_crpix(&self, crpix: [f64; 2]) -> Self {
        Self { crpix, ..*self }
    }

    pub fn with_cd(&self, cd: [[f64; 2]; 2]) -> WcsResult<Self> {
        Self::from_cd(self.crpix, cd)
    }

    /// Right-multiplies the matrix by the rotation `[[cos, -sin], [sin, cos]]`.
    pub fn rotated(&self, theta_rad: f64) -> WcsResult<Self> {
        let (s, c) = theta_rad.sin_cos();
        let m = self.cd;
        self.with_cd([
            [m[0][0] * c + m[0][1] * s, -m[0][0] * s + m[0][1] * c],
            [m[1][0] * c + m[1][1] * s, -m[1][0] * s + m[1][1] * c],
        ])
    }

    /// Multiplies row 0 (x) by `factors[0]` and row 1 (y) by `factors[1]`.
    pub fn scaled_rows(&self, factors: [f64; 2]) -> WcsResult<Self> {
        let m = self.cd;
        self.with_cd([
            [m[0][0] * factors[0], m[0][1] * factors[0]],
            [m[1][0] * factors[1], m[1][1] * factors[1]],
        ])
    }
}

fn compute_inverse(m: [[f64; 2]; 2], det: f64) -> [[f64; 2]; 2] {
    let inv_det = 1.0 / det;
    [
        [m[1][1] * inv_det, -m[0][1] * inv_det],
        [-m[1][0] * inv_det, m[0][0] * inv_det],
    ]
}
