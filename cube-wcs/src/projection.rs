//! Axis types and the gnomonic (TAN) sky projection.
//!
//! Two kinds of spatial system are supported: a plain linear mapping and the
//! tangent-plane projection. For TAN the chain is
//!
//! ```text
//! intermediate (x, y) --deproject--> native (phi, theta) --rotate--> sky (alpha, delta)
//! ```
//!
//! with the native pole placed so that the reference point sits at
//! `(phi, theta) = (0, 90)`.

use cube_core::constants::{HALF_PI, RAD_TO_DEG};
use cube_core::Angle;

use crate::coordinate::{CelestialCoord, IntermediateCoord, NativeCoord};
use crate::error::{WcsError, WcsResult};

/// Celestial frame named by the `CTYPE` prefix. Carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordType {
    #[default]
    Equatorial,
    Galactic,
    Ecliptic,
    Helioecliptic,
    Supergalactic,
    Generic,
}

impl CoordType {
    pub fn from_ctype_prefix(prefix: &str) -> Self {
        match prefix {
            "RA" | "DEC" => Self::Equatorial,
            "GLON" | "GLAT" => Self::Galactic,
            "ELON" | "ELAT" => Self::Ecliptic,
            "HLON" | "HLAT" => Self::Helioecliptic,
            "SLON" | "SLAT" => Self::Supergalactic,
            _ => Self::Generic,
        }
    }

    /// `(longitude, latitude)` prefixes.
    pub fn ctype_prefixes(&self) -> (&'static str, &'static str) {
        match self {
            Self::Equatorial => ("RA", "DEC"),
            Self::Galactic => ("GLON", "GLAT"),
            Self::Ecliptic => ("ELON", "ELAT"),
            Self::Helioecliptic => ("HLON", "HLAT"),
            Self::Supergalactic => ("SLON", "SLAT"),
            Self::Generic => ("XLON", "XLAT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    #[default]
    Linear,
    Tangent(CoordType),
}

pub const LINEAR_CTYPE: &str = "LINEAR";
const TAN_CODE: &str = "TAN";

impl Projection {
    /// Interprets the `CTYPE1`/`CTYPE2` pair.
    ///
    /// Types without a projection code (`LINEAR`, `PIXEL`, ...) give a linear
    /// system; `xxxx-TAN` on both axes gives the tangent projection.
    pub fn from_ctypes(ctype1: &str, ctype2: &str) -> WcsResult<Self> {
        let axis1 = parse_ctype(ctype1, "CTYPE1")?;
        let axis2 = parse_ctype(ctype2, "CTYPE2")?;

        match (axis1, axis2) {
            (None, None) => Ok(Self::Linear),
            (Some((prefix, code1)), Some((_, code2))) => {
                if code1 != code2 {
                    return Err(WcsError::malformed(
                        "CTYPE1/CTYPE2",
                        format!("mismatched projection codes '{code1}' vs '{code2}'"),
                    ));
                }
                if code1 != TAN_CODE {
                    return Err(WcsError::malformed(
                        "CTYPE1",
                        format!("unsupported projection '{code1}'"),
                    ));
                }
                Ok(Self::Tangent(CoordType::from_ctype_prefix(prefix)))
            }
            _ => Err(WcsError::malformed(
                "CTYPE1/CTYPE2",
                format!("cannot mix projected and linear axes ('{ctype1}', '{ctype2}')"),
            )),
        }
    }

    #[inline]
    pub fn is_angular(&self) -> bool {
        matches!(self, Self::Tangent(_))
    }

    /// `(CTYPE1, CTYPE2)` values for output records.
    pub fn ctypes(&self) -> (String, String) {
        match self {
            Self::Linear => (LINEAR_CTYPE.to_string(), LINEAR_CTYPE.to_string()),
            Self::Tangent(frame) => {
                let (lon, lat) = frame.ctype_prefixes();
                (format_ctype(lon, TAN_CODE), format_ctype(lat, TAN_CODE))
            }
        }
    }

    /// Maps intermediate offsets to world values, both in FITS order
    /// `[axis1, axis2]`. For TAN everything is in degrees.
    pub fn intermediate_to_world(&self, inter: IntermediateCoord, crval: [f64; 2]) -> [f64; 2] {
        match self {
            Self::Linear => [crval[0] + inter.x(), crval[1] + inter.y()],
            Self::Tangent(_) => {
                let rotation = SphericalRotation::zenithal(
                    Angle::from_degrees(crval[0]),
                    Angle::from_degrees(crval[1]),
                );
                let sky = rotation.native_to_celestial(deproject_tan(inter));
                [sky.alpha().degrees(), sky.delta().degrees()]
            }
        }
    }

    /// Inverse of [`intermediate_to_world`](Self::intermediate_to_world).
    pub fn world_to_intermediate(&self, world: [f64; 2], crval: [f64; 2]) -> IntermediateCoord {
        match self {
            Self::Linear => IntermediateCoord::new(world[0] - crval[0], world[1] - crval[1]),
            Self::Tangent(_) => {
                let rotation = SphericalRotation::zenithal(
                    Angle::from_degrees(crval[0]),
                    Angle::from_degrees(crval[1]),
                );
                let native = rotation.celestial_to_native(CelestialCoord::new(
                    Angle::from_degrees(world[0]),
                    Angle::from_degrees(world[1]),
                ));
                project_tan(native)
            }
        }
    }
}

/// Splits `RA---TAN` into `("RA", "TAN")`; types without a dash are linear.
fn parse_ctype<'a>(ctype: &'a str, keyword: &str) -> WcsResult<Option<(&'a str, &'a str)>> {
    let trimmed = ctype.trim();
    let Some(dash_pos) = trimmed.rfind('-') else {
        return Ok(None);
    };
    if dash_pos == 0 {
        return Err(WcsError::malformed(
            keyword,
            format!("invalid CTYPE format '{ctype}'"),
        ));
    }

    let prefix = trimmed[..dash_pos].trim_end_matches('-');
    let code = &trimmed[dash_pos + 1..];
    if code.is_empty() {
        return Err(WcsError::malformed(
            keyword,
            format!("missing projection code in '{ctype}'"),
        ));
    }
    Ok(Some((prefix, code)))
}

fn format_ctype(prefix: &str, proj_code: &str) -> String {
    let padding_len = 4usize.saturating_sub(prefix.len());
    let dashes = "-".repeat(padding_len + 1);
    format!("{}{}{}", prefix, dashes, proj_code)
}

/// Rotation between native spherical coordinates and the sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalRotation {
    alpha_p: f64,
    delta_p: f64,
    phi_p: f64,
    sin_delta_p: f64,
    cos_delta_p: f64,
}

impl SphericalRotation {
    pub fn new(alpha_p: Angle, delta_p: Angle, phi_p: Angle) -> Self {
        let delta_p_rad = delta_p.radians();
        let (sin_delta_p, cos_delta_p) = delta_p_rad.sin_cos();
        Self {
            alpha_p: alpha_p.radians(),
            delta_p: delta_p_rad,
            phi_p: phi_p.radians(),
            sin_delta_p,
            cos_delta_p,
        }
    }

    /// For zenithal projections the native pole coincides with the reference
    /// point, and the native longitude of the celestial pole is 180° unless
    /// the reference point is the pole itself.
    pub fn zenithal(alpha_0: Angle, delta_0: Angle) -> Self {
        let phi_p = if delta_0.degrees() >= 90.0 { 0.0 } else { 180.0 };
        Self::new(alpha_0, delta_0, Angle::from_degrees(phi_p))
    }

    pub fn native_to_celestial(&self, native: NativeCoord) -> CelestialCoord {
        let phi = native.phi().radians();
        let theta = native.theta().radians();

        let (sin_theta, cos_theta) = theta.sin_cos();
        let d_phi = phi - self.phi_p;
        let (sin_d_phi, cos_d_phi) = d_phi.sin_cos();

        let sin_delta = sin_theta * self.sin_delta_p + cos_theta * self.cos_delta_p * cos_d_phi;
        let delta = asin_safe(sin_delta);

        let x = -cos_theta * sin_d_phi;
        let y = sin_theta * self.cos_delta_p - cos_theta * self.sin_delta_p * cos_d_phi;
        let alpha = self.alpha_p + x.atan2(y);

        CelestialCoord::new(Angle::from_radians(alpha).wrapped(), Angle::from_radians(delta))
    }

    pub fn celestial_to_native(&self, celestial: CelestialCoord) -> NativeCoord {
        let alpha = celestial.alpha().radians();
        let delta = celestial.delta().radians();

        let (sin_delta, cos_delta) = delta.sin_cos();
        let d_alpha = alpha - self.alpha_p;
        let (sin_d_alpha, cos_d_alpha) = d_alpha.sin_cos();

        let sin_theta = sin_delta * self.sin_delta_p + cos_delta * self.cos_delta_p * cos_d_alpha;
        let theta = asin_safe(sin_theta);

        let x = -cos_delta * sin_d_alpha;
        let y = sin_delta * self.cos_delta_p - cos_delta * self.sin_delta_p * cos_d_alpha;
        let phi = self.phi_p + x.atan2(y);

        NativeCoord::new(Angle::from_radians(phi).wrapped(), Angle::from_radians(theta))
    }

    #[inline]
    pub fn phi_p_degrees(&self) -> f64 {
        self.phi_p * RAD_TO_DEG
    }

    #[inline]
    pub fn delta_p_degrees(&self) -> f64 {
        self.delta_p * RAD_TO_DEG
    }
}

#[inline]
fn asin_safe(sin_value: f64) -> f64 {
    sin_value.clamp(-1.0, 1.0).asin()
}

/// Points on or behind the horizon (`theta <= 0`) have no tangent-plane
/// position and come back as NaN.
pub(crate) fn project_tan(native: NativeCoord) -> IntermediateCoord {
    let phi = native.phi().radians();
    let theta = native.theta().radians();

    if theta == HALF_PI {
        return IntermediateCoord::new(0.0, 0.0);
    }
    if theta <= 0.0 {
        return IntermediateCoord::new(f64::NAN, f64::NAN);
    }
    let (rt_sin, rt_cos) = theta.sin_cos();
    let r_theta = rt_cos / rt_sin;
    let (ps, pc) = phi.sin_cos();
    IntermediateCoord::new(r_theta * ps * RAD_TO_DEG, -r_theta * pc * RAD_TO_DEG)
}

pub(crate) fn deproject_tan(inter: IntermediateCoord) -> NativeCoord {
    let x = inter.x().to_radians();
    let y = inter.y().to_radians();
    let r_theta = libm::hypot(x, y);

    if r_theta == 0.0 {
        return NativeCoord::new(Angle::ZERO, Angle::from_degrees(90.0));
    }

    let phi = x.atan2(-y);
    let theta = 1.0_f64.atan2(r_theta);
    NativeCoord::new(Angle::from_radians(phi).wrapped(), Angle::from_radians(theta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_projection_from_ctypes() {
        assert_eq!(
            Projection::from_ctypes("LINEAR", "LINEAR").unwrap(),
            Projection::Linear
        );
        assert_eq!(
            Projection::from_ctypes("RA---TAN", "DEC--TAN").unwrap(),
            Projection::Tangent(CoordType::Equatorial)
        );
        assert_eq!(
            Projection::from_ctypes("GLON-TAN", "GLAT-TAN").unwrap(),
            Projection::Tangent(CoordType::Galactic)
        );
    }

    #[test]
    fn test_unsupported_projection() {
        let err = Projection::from_ctypes("RA---SIN", "DEC--SIN").unwrap_err();
        assert!(matches!(err, WcsError::MalformedCoordinateMetadata { .. }));
    }

    #[test]
    fn test_mixed_axes_rejected() {
        assert!(Projection::from_ctypes("RA---TAN", "LINEAR").is_err());
        assert!(Projection::from_ctypes("RA---TAN", "DEC--CAR").is_err());
    }

    #[test]
    fn test_ctypes_output() {
        let (c1, c2) = Projection::Tangent(CoordType::Equatorial).ctypes();
        assert_eq!(c1, "RA---TAN");
        assert_eq!(c2, "DEC--TAN");
        let (l1, l2) = Projection::Linear.ctypes();
        assert_eq!(l1, "LINEAR");
        assert_eq!(l2, "LINEAR");
    }

    #[test]
    fn test_coord_type_prefix_roundtrip() {
        for frame in [
            CoordType::Equatorial,
            CoordType::Galactic,
            CoordType::Ecliptic,
            CoordType::Helioecliptic,
            CoordType::Supergalactic,
        ] {
            let (lon, lat) = frame.ctype_prefixes();
            assert_eq!(CoordType::from_ctype_prefix(lon), frame);
            assert_eq!(CoordType::from_ctype_prefix(lat), frame);
        }
    }

    #[test]
    fn test_reference_point_maps_to_crval() {
        let tan = Projection::Tangent(CoordType::Equatorial);
        let crval = [338.23092027, -60.56375796];
        let world = tan.intermediate_to_world(IntermediateCoord::new(0.0, 0.0), crval);
        assert_abs_diff_eq!(world[0], crval[0], epsilon = 1e-10);
        assert_abs_diff_eq!(world[1], crval[1], epsilon = 1e-10);
    }

    #[test]
    fn test_tan_roundtrip() {
        let tan = Projection::Tangent(CoordType::Equatorial);
        let crval = [338.23092027, -60.56375796];
        let inter = IntermediateCoord::new(-0.0031, 0.0042);
        let world = tan.intermediate_to_world(inter, crval);
        let back = tan.world_to_intermediate(world, crval);
        assert_abs_diff_eq!(back.x(), inter.x(), epsilon = 1e-10);
        assert_abs_diff_eq!(back.y(), inter.y(), epsilon = 1e-10);
    }

    #[test]
    fn test_tan_small_offsets_are_nearly_linear() {
        let tan = Projection::Tangent(CoordType::Equatorial);
        let world = tan.intermediate_to_world(IntermediateCoord::new(0.0, 0.01), [10.0, 0.0]);
        assert_abs_diff_eq!(world[0], 10.0, epsilon = 1e-10);
        assert_abs_diff_eq!(world[1], 0.01, epsilon = 1e-8);
    }

    #[test]
    fn test_tan_behind_horizon_is_nan() {
        let tan = Projection::Tangent(CoordType::Equatorial);
        let inter = tan.world_to_intermediate([180.0, 0.0], [0.0, 0.0]);
        assert!(inter.x().is_nan());
        assert!(inter.y().is_nan());
    }

    #[test]
    fn test_zenithal_rotation_pole() {
        let rotation = SphericalRotation::zenithal(Angle::from_degrees(10.0), Angle::from_degrees(-30.0));
        assert_eq!(rotation.phi_p_degrees(), 180.0);
        assert_abs_diff_eq!(rotation.delta_p_degrees(), -30.0, epsilon = 1e-12);

        let at_pole = SphericalRotation::zenithal(Angle::from_degrees(0.0), Angle::from_degrees(90.0));
        assert_eq!(at_pole.phi_p_degrees(), 0.0);
    }

    #[test]
    fn test_linear_world_is_offset() {
        let world = Projection::Linear.intermediate_to_world(IntermediateCoord::new(1.5, -2.0), [10.0, 20.0]);
        assert_eq!(world, [11.5, 18.0]);
        let inter = Projection::Linear.world_to_intermediate(world, [10.0, 20.0]);
        assert_eq!(inter, IntermediateCoord::new(1.5, -2.0));
    }
}
