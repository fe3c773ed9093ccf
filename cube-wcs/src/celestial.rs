//! World coordinates of the spatial plane of an image or cube.
//!
//! A [`CelestialWcs`] pairs a [`LinearTransform`] (reference pixel and CD
//! matrix) with a reference world value, a unit and a [`Projection`]. Pixel
//! positions handed in and out are 0-based array indices ordered `[y, x]`;
//! world positions are ordered `[y, x]` too, i.e. `[dec, ra]` on the sky.
//!
//! ```
//! use cube_wcs::CelestialWcs;
//!
//! let wcs = CelestialWcs::builder().crval(0.0, 0.0).shape(5, 6).build().unwrap();
//! assert_eq!(wcs.start(None).unwrap(), [-2.0, -2.5]);
//! assert_eq!(wcs.end(None).unwrap(), [2.0, 2.5]);
//! ```

use cube_core::constants::{DEG_TO_RAD, RAD_TO_DEG};
use cube_core::Unit;

use crate::axis::covering_extent;
use crate::builder::CelestialWcsBuilder;
use crate::config::{close, Tolerances};
use crate::coordinate::{pairs_from_flat, IntermediateCoord, PixelCoord};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{WcsError, WcsResult};
use crate::header::{KeywordProvider, WcsKeyword};
use crate::linear::{LinearTransform, MatrixSpec};
use crate::projection::{Projection, LINEAR_CTYPE};
use crate::selection::AxisSelector;
use crate::sexagesimal::deg_to_sexa;
use crate::summary::CelestialSummary;

/// Rotations smaller than this (in degrees) are treated as zero when the
/// step is replaced.
const ROTATION_EPSILON_DEG: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
pub struct CelestialWcs {
    linear: LinearTransform,
    /// FITS order: `[axis1, axis2]`, in `unit`.
    crval: [f64; 2],
    projection: Projection,
    unit: Unit,
    /// FITS order: `[naxis1, naxis2]`; zero when unknown.
    naxis: [usize; 2],
}

impl CelestialWcs {
    pub fn builder() -> CelestialWcsBuilder {
        CelestialWcsBuilder::new()
    }

    pub(crate) fn from_parts(
        linear: LinearTransform,
        crval: [f64; 2],
        projection: Projection,
        unit: Unit,
        naxis: [usize; 2],
    ) -> Self {
        Self {
            linear,
            crval,
            projection,
            unit,
            naxis,
        }
    }

    /// Reads the two spatial axes of a metadata record.
    ///
    /// The matrix may be given as `CDi_j`, as `PCi_j` with `CDELTi`, or as
    /// `CDELTi` with `CROTA2`. Missing `NAXISi` keywords leave the extent at
    /// zero and are reported through `sink`, as is a second axis whose unit
    /// differs from (and was converted into) the first axis's unit.
    pub fn from_header(
        header: &(impl KeywordProvider + ?Sized),
        sink: &mut impl DiagnosticSink,
    ) -> WcsResult<Self> {
        let ctype1 = read_ctype(header, "CTYPE1");
        let ctype2 = read_ctype(header, "CTYPE2");
        let projection = Projection::from_ctypes(&ctype1, &ctype2)?;

        let crpix = [header.require_float("CRPIX1")?, header.require_float("CRPIX2")?];
        let mut crval = [header.require_float("CRVAL1")?, header.require_float("CRVAL2")?];
        let matrix = parse_matrix(header)?;
        let mut cd = matrix.resolve();

        let default_unit = if projection.is_angular() {
            Unit::degree()
        } else {
            Unit::pixel()
        };
        let unit1 = read_unit(header, "CUNIT1")?.unwrap_or_else(|| default_unit.clone());
        let unit2 = read_unit(header, "CUNIT2")?.unwrap_or(default_unit);
        if projection.is_angular() {
            for (keyword, unit) in [("CUNIT1", &unit1), ("CUNIT2", &unit2)] {
                if !unit.is_angle() {
                    return Err(WcsError::malformed(
                        keyword,
                        format!("'{unit}' is not an angular unit"),
                    ));
                }
            }
        }
        if unit2 != unit1 {
            if !unit2.is_compatible(&unit1) {
                return Err(WcsError::malformed(
                    "CUNIT2",
                    format!("'{unit2}' cannot be converted to '{unit1}'"),
                ));
            }
            let factor = unit2.convert(1.0, &unit1)?;
            crval[1] *= factor;
            cd[1][0] *= factor;
            cd[1][1] *= factor;
            sink.emit(Diagnostic::UnitMismatch {
                axis1: unit1.symbol().to_string(),
                axis2: unit2.symbol().to_string(),
            });
        }

        let naxis = [
            read_extent(header, "NAXIS1", sink)?,
            read_extent(header, "NAXIS2", sink)?,
        ];
        let linear = LinearTransform::from_cd(crpix, cd)?;

        tracing::debug!(
            representation = matrix.name(),
            ctype1 = %ctype1,
            ctype2 = %ctype2,
            unit = %unit1,
            "spatial coordinate system read from header"
        );
        Ok(Self::from_parts(linear, crval, projection, unit1, naxis))
    }

    /// Converts `unit`-free intermediate offsets to degrees for projected
    /// systems; linear systems work in their own unit.
    fn projection_scale(&self) -> WcsResult<f64> {
        if self.projection.is_angular() {
            Ok(self.unit.convert(1.0, &Unit::degree())?)
        } else {
            Ok(1.0)
        }
    }

    fn index_to_world(&self, index: [f64; 2], scale: f64) -> [f64; 2] {
        let inter = self
            .linear
            .pixel_to_intermediate(PixelCoord::from_array_index(index));
        let inter = IntermediateCoord::new(inter.x() * scale, inter.y() * scale);
        let crval = [self.crval[0] * scale, self.crval[1] * scale];
        let world = self.projection.intermediate_to_world(inter, crval);
        [world[1] / scale, world[0] / scale]
    }

    fn world_to_index(&self, world: [f64; 2], scale: f64) -> [f64; 2] {
        let crval = [self.crval[0] * scale, self.crval[1] * scale];
        let inter = self
            .projection
            .world_to_intermediate([world[1] * scale, world[0] * scale], crval);
        let inter = IntermediateCoord::new(inter.x() / scale, inter.y() / scale);
        self.linear.intermediate_to_pixel(inter).to_array_index()
    }

    /// World `[y, x]` positions of 0-based `[row, col]` pixels, in `unit` or
    /// the system's own unit.
    pub fn pixel_to_world(
        &self,
        pixels: &[[f64; 2]],
        unit: Option<&Unit>,
    ) -> WcsResult<Vec<[f64; 2]>> {
        let scale = self.projection_scale()?;
        pixels
            .iter()
            .map(|&p| {
                let [y, x] = self.index_to_world(p, scale);
                Ok([self.unit.convert_to(y, unit)?, self.unit.convert_to(x, unit)?])
            })
            .collect()
    }

    pub fn pixel_to_world_one(&self, pixel: [f64; 2], unit: Option<&Unit>) -> WcsResult<[f64; 2]> {
        let scale = self.projection_scale()?;
        let [y, x] = self.index_to_world(pixel, scale);
        Ok([self.unit.convert_to(y, unit)?, self.unit.convert_to(x, unit)?])
    }

    /// Like [`pixel_to_world`](Self::pixel_to_world) for a row-major buffer
    /// with `width` values per row. Only `width == 2` is accepted.
    pub fn pixel_to_world_flat(
        &self,
        values: &[f64],
        width: usize,
        unit: Option<&Unit>,
    ) -> WcsResult<Vec<[f64; 2]>> {
        self.pixel_to_world(&pairs_from_flat(values, width)?, unit)
    }

    /// Fractional 0-based `[row, col]` pixels of world `[y, x]` positions.
    pub fn world_to_pixel(
        &self,
        world: &[[f64; 2]],
        unit: Option<&Unit>,
    ) -> WcsResult<Vec<[f64; 2]>> {
        let scale = self.projection_scale()?;
        world
            .iter()
            .map(|&[y, x]| {
                let position = [self.unit.convert_from(y, unit)?, self.unit.convert_from(x, unit)?];
                Ok(self.world_to_index(position, scale))
            })
            .collect()
    }

    pub fn world_to_pixel_one(&self, world: [f64; 2], unit: Option<&Unit>) -> WcsResult<[f64; 2]> {
        let scale = self.projection_scale()?;
        let position = [
            self.unit.convert_from(world[0], unit)?,
            self.unit.convert_from(world[1], unit)?,
        ];
        Ok(self.world_to_index(position, scale))
    }

    /// Nearest integer pixels, rounding half up. When both extents are known
    /// the result is clamped into the array.
    pub fn world_to_pixel_nearest(
        &self,
        world: &[[f64; 2]],
        unit: Option<&Unit>,
    ) -> WcsResult<Vec<[i64; 2]>> {
        let [nx, ny] = self.naxis;
        Ok(self
            .world_to_pixel(world, unit)?
            .into_iter()
            .map(|[y, x]| {
                let mut index = [(y + 0.5).floor() as i64, (x + 0.5).floor() as i64];
                if nx != 0 && ny != 0 {
                    index[0] = index[0].clamp(0, ny as i64 - 1);
                    index[1] = index[1].clamp(0, nx as i64 - 1);
                }
                index
            })
            .collect())
    }

    pub fn world_to_pixel_flat(
        &self,
        values: &[f64],
        width: usize,
        unit: Option<&Unit>,
    ) -> WcsResult<Vec<[f64; 2]>> {
        self.world_to_pixel(&pairs_from_flat(values, width)?, unit)
    }

    pub fn is_equal(&self, other: &Self) -> bool {
        self.is_equal_with(other, &Tolerances::DEFAULT)
    }

    /// Same extents, and the same world position of pixel `(0, 0)`, step
    /// and rotation within tolerance. `other` is compared in this system's
    /// unit; systems with incompatible units are never equal.
    pub fn is_equal_with(&self, other: &Self, tolerances: &Tolerances) -> bool {
        if self.naxis != other.naxis {
            return false;
        }
        let (Ok(start), Ok(other_start), Ok(step), Ok(other_step), Ok(rot), Ok(other_rot)) = (
            self.start(None),
            other.start(Some(&self.unit)),
            self.step(None),
            other.step(Some(&self.unit)),
            self.rotation(None),
            other.rotation(None),
        ) else {
            return false;
        };
        (0..2).all(|i| close(start[i], other_start[i], tolerances.position))
            && (0..2).all(|i| close(step[i], other_step[i], tolerances.step))
            && close(rot, other_rot, tolerances.rotation)
    }

    /// Whether both systems have the same pixel size.
    pub fn same_step(&self, other: &Self) -> bool {
        self.same_step_with(other, &Tolerances::DEFAULT)
    }

    pub fn same_step_with(&self, other: &Self, tolerances: &Tolerances) -> bool {
        match (self.step(None), other.step(Some(&self.unit))) {
            (Ok(a), Ok(b)) => (0..2).all(|i| close(a[i], b[i], tolerances.same_step)),
            _ => false,
        }
    }

    /// Coordinate system of a sub-array.
    ///
    /// Bounds are clamped into the array and negative positions count from
    /// the end; a single index keeps one row or column. Strided ranges are
    /// rejected.
    pub fn slice(
        &self,
        rows: impl Into<AxisSelector>,
        cols: impl Into<AxisSelector>,
    ) -> WcsResult<Self> {
        let rows: AxisSelector = rows.into();
        let cols: AxisSelector = cols.into();
        let rows = rows.window(self.naxis[1])?;
        let cols = cols.window(self.naxis[0])?;
        let crpix = self.linear.crpix();

        let mut out = self.clone();
        out.linear = self
            .linear
            .with_crpix([crpix[0] - cols.start as f64, crpix[1] - rows.start as f64]);
        out.naxis = [cols.len(), rows.len()];
        Ok(out)
    }

    /// Pixel size `[dy, dx]`.
    pub fn step(&self, unit: Option<&Unit>) -> WcsResult<[f64; 2]> {
        let [dx, dy] = self.linear.axis_steps();
        Ok([self.unit.convert_to(dy, unit)?, self.unit.convert_to(dx, unit)?])
    }

    /// Rotation of the pixel grid, in degrees unless `unit` says otherwise.
    pub fn rotation(&self, unit: Option<&Unit>) -> WcsResult<f64> {
        Ok(Unit::degree().convert_to(self.linear.rotation_rad() * RAD_TO_DEG, unit)?)
    }

    /// `[[ymin, xmin], [ymax, xmax]]` over the four corner pixels.
    pub fn range(&self, unit: Option<&Unit>) -> WcsResult<[[f64; 2]; 2]> {
        let last_row = self.naxis[1] as f64 - 1.0;
        let last_col = self.naxis[0] as f64 - 1.0;
        let corners = self.pixel_to_world(
            &[[0.0, 0.0], [last_row, 0.0], [0.0, last_col], [last_row, last_col]],
            unit,
        )?;
        let mut lo = [f64::INFINITY; 2];
        let mut hi = [f64::NEG_INFINITY; 2];
        for corner in corners {
            for i in 0..2 {
                lo[i] = lo[i].min(corner[i]);
                hi[i] = hi[i].max(corner[i]);
            }
        }
        Ok([lo, hi])
    }

    /// World position of pixel `(0, 0)`.
    pub fn start(&self, unit: Option<&Unit>) -> WcsResult<[f64; 2]> {
        self.pixel_to_world_one([0.0, 0.0], unit)
    }

    /// World position of the last pixel.
    pub fn end(&self, unit: Option<&Unit>) -> WcsResult<[f64; 2]> {
        self.pixel_to_world_one(
            [self.naxis[1] as f64 - 1.0, self.naxis[0] as f64 - 1.0],
            unit,
        )
    }

    #[inline]
    pub fn cd_matrix(&self) -> [[f64; 2]; 2] {
        self.linear.cd_matrix()
    }

    #[inline]
    pub fn crpix1(&self) -> f64 {
        self.linear.crpix()[0]
    }

    #[inline]
    pub fn crpix2(&self) -> f64 {
        self.linear.crpix()[1]
    }

    pub fn crval1(&self, unit: Option<&Unit>) -> WcsResult<f64> {
        Ok(self.unit.convert_to(self.crval[0], unit)?)
    }

    pub fn crval2(&self, unit: Option<&Unit>) -> WcsResult<f64> {
        Ok(self.unit.convert_to(self.crval[1], unit)?)
    }

    #[inline]
    pub fn naxis1(&self) -> usize {
        self.naxis[0]
    }

    #[inline]
    pub fn naxis2(&self) -> usize {
        self.naxis[1]
    }

    #[inline]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    #[inline]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    #[inline]
    pub fn is_angular(&self) -> bool {
        self.projection.is_angular()
    }

    #[inline]
    pub fn linear(&self) -> &LinearTransform {
        &self.linear
    }

    pub fn set_crpix1(&mut self, x: f64) {
        let crpix = self.linear.crpix();
        self.linear = self.linear.with_crpix([x, crpix[1]]);
    }

    pub fn set_crpix2(&mut self, y: f64) {
        let crpix = self.linear.crpix();
        self.linear = self.linear.with_crpix([crpix[0], y]);
    }

    pub fn set_crval1(&mut self, x: f64, unit: Option<&Unit>) -> WcsResult<()> {
        self.crval[0] = self.unit.convert_from(x, unit)?;
        Ok(())
    }

    pub fn set_crval2(&mut self, y: f64, unit: Option<&Unit>) -> WcsResult<()> {
        self.crval[1] = self.unit.convert_from(y, unit)?;
        Ok(())
    }

    pub fn set_naxis1(&mut self, n: usize) {
        self.naxis[0] = n;
    }

    pub fn set_naxis2(&mut self, n: usize) {
        self.naxis[1] = n;
    }

    /// Replaces the pixel size `[dy, dx]`, keeping the rotation.
    ///
    /// Projected systems get a negative x term so that longitude increases
    /// to the left.
    pub fn set_step(&mut self, step: [f64; 2], unit: Option<&Unit>) -> WcsResult<()> {
        let step = [
            self.unit.convert_from(step[0], unit)?,
            self.unit.convert_from(step[1], unit)?,
        ];
        if step.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err(WcsError::invalid_parameter(format!(
                "pixel step must be finite and nonzero, got {step:?}"
            )));
        }

        let theta = self.rotation(None)?;
        let sx = if self.is_angular() { -step[1] } else { step[1] };
        let mut linear = self.linear.with_cd([[sx, 0.0], [0.0, step[0]]])?;
        if theta.abs() > ROTATION_EPSILON_DEG {
            linear = linear.rotated(theta * DEG_TO_RAD)?;
        }
        self.linear = linear;
        Ok(())
    }

    /// Rotates the pixel grid by `theta_deg` degrees.
    pub fn rotate(&mut self, theta_deg: f64) -> WcsResult<()> {
        self.linear = self.linear.rotated(theta_deg * DEG_TO_RAD)?;
        Ok(())
    }

    /// A new grid with pixel size `step` (`[dy, dx]`) whose pixel `(0, 0)`
    /// is centred on `start`, extended far enough to cover this grid.
    ///
    /// Without `start` the new first pixel shares its outer corner with the
    /// current first pixel.
    pub fn resample(
        &self,
        step: [f64; 2],
        start: Option<[f64; 2]>,
        unit: Option<&Unit>,
    ) -> WcsResult<Self> {
        let step = [
            self.unit.convert_from(step[0], unit)?,
            self.unit.convert_from(step[1], unit)?,
        ];
        if step.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(WcsError::invalid_parameter(format!(
                "resampling step must be positive, got {step:?}"
            )));
        }

        let old_step = self.step(None)?;
        let old_start = self.start(None)?;
        let start = match start {
            Some([y, x]) => [self.unit.convert_from(y, unit)?, self.unit.convert_from(x, unit)?],
            None => [
                old_start[0] - 0.5 * old_step[0] + 0.5 * step[0],
                old_start[1] - 0.5 * old_step[1] + 0.5 * step[1],
            ],
        };

        let mut out = self.clone();
        out.linear = self.linear.with_crpix([1.0, 1.0]);
        out.crval = [start[1], start[0]];
        out.set_step(step, None)?;
        out.naxis = [
            covering_extent(self.naxis[0], old_step[1], start[1], old_start[1], step[1]),
            covering_extent(self.naxis[1], old_step[0], start[0], old_start[0], step[0]),
        ];

        tracing::debug!(?step, ?start, naxis = ?out.naxis, "resampled spatial grid");
        Ok(out)
    }

    /// A grid whose pixels merge `factor = [fy, fx]` pixels of this one.
    ///
    /// The reference pixel moves so that each new pixel is centred on the
    /// block it replaces. Extents that are not a multiple of the factor are
    /// truncated and reported through `sink`.
    pub fn rebin(&self, factor: [usize; 2], sink: &mut impl DiagnosticSink) -> WcsResult<Self> {
        let [fy, fx] = factor;
        if fy == 0 || fx == 0 {
            return Err(WcsError::invalid_parameter(format!(
                "rebinning factors must be at least 1, got {factor:?}"
            )));
        }

        let old = self.linear.axis_steps();
        let linear = self.linear.scaled_rows([fx as f64, fy as f64])?;
        let new = linear.axis_steps();
        let crpix = self.linear.crpix();
        let recentred = [
            (crpix[0] * old[0] - old[0] / 2.0 + new[0] / 2.0) / new[0],
            (crpix[1] * old[1] - old[1] / 2.0 + new[1] / 2.0) / new[1],
        ];

        for (axis, extent, f) in [("x", self.naxis[0], fx), ("y", self.naxis[1], fy)] {
            if extent % f != 0 {
                sink.emit(Diagnostic::RebinRemainder {
                    axis,
                    extent,
                    factor: f,
                });
            }
        }

        let mut out = self.clone();
        out.linear = linear.with_crpix(recentred);
        out.naxis = [self.naxis[0] / fx, self.naxis[1] / fy];
        Ok(out)
    }

    /// Adopts the extents of the data the system is attached to.
    pub fn fit_to_shape(&mut self, ny: usize, nx: usize, sink: &mut impl DiagnosticSink) {
        let data = [nx, ny];
        if self.naxis != [0, 0] && self.naxis != data {
            sink.emit(Diagnostic::ShapeAdjusted {
                from: vec![self.naxis[1], self.naxis[0]],
                to: vec![ny, nx],
            });
        }
        self.naxis = data;
    }

    /// Metadata keywords describing this system, always with a CD matrix.
    pub fn to_keywords(&self) -> Vec<WcsKeyword> {
        let (ctype1, ctype2) = self.projection.ctypes();
        let crpix = self.linear.crpix();
        let cd = self.linear.cd_matrix();

        let mut keywords = vec![
            WcsKeyword::integer("WCSAXES", 2),
            WcsKeyword::real("CRPIX1", crpix[0]),
            WcsKeyword::real("CRPIX2", crpix[1]),
            WcsKeyword::real("CRVAL1", self.crval[0]),
            WcsKeyword::real("CRVAL2", self.crval[1]),
            WcsKeyword::string("CTYPE1", ctype1),
            WcsKeyword::string("CTYPE2", ctype2),
            WcsKeyword::string("CUNIT1", self.unit.symbol()),
            WcsKeyword::string("CUNIT2", self.unit.symbol()),
            WcsKeyword::real("CD1_1", cd[0][0]),
            WcsKeyword::real("CD1_2", cd[0][1]),
            WcsKeyword::real("CD2_1", cd[1][0]),
            WcsKeyword::real("CD2_2", cd[1][1]),
        ];
        if self.naxis != [0, 0] {
            keywords.push(WcsKeyword::integer("NAXIS1", self.naxis[0] as i64));
            keywords.push(WcsKeyword::integer("NAXIS2", self.naxis[1] as i64));
        }
        keywords
    }

    /// Centre, size, step and rotation.
    pub fn summary(&self) -> WcsResult<CelestialSummary> {
        let rotation_deg = self.rotation(None)?;
        let [nx, ny] = self.naxis;

        if self.is_angular() {
            let [dy, dx] = self.step(Some(&Unit::arcsecond()))?;
            let centre = [(ny as f64 - 1.0) / 2.0, (nx as f64 - 1.0) / 2.0];
            let centre = self.pixel_to_world_one(centre, Some(&Unit::degree()))?;
            Ok(CelestialSummary::Sky {
                center: deg_to_sexa(centre),
                size_arcsec: [dy * ny as f64, dx * nx as f64],
                step_arcsec: [dy, dx],
                rotation_deg,
            })
        } else {
            Ok(CelestialSummary::Plane {
                unit: self.unit.symbol().to_string(),
                start: self.start(None)?,
                end: self.end(None)?,
                step: self.step(None)?,
                rotation_deg,
            })
        }
    }
}

fn read_ctype(header: &(impl KeywordProvider + ?Sized), keyword: &str) -> String {
    header
        .get_string(keyword)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| LINEAR_CTYPE.to_string())
}

fn read_unit(header: &(impl KeywordProvider + ?Sized), keyword: &str) -> WcsResult<Option<Unit>> {
    match header.get_string(keyword) {
        Some(text) if !text.trim().is_empty() => text
            .parse::<Unit>()
            .map(Some)
            .map_err(|e| WcsError::malformed(keyword, e.to_string())),
        _ => Ok(None),
    }
}

fn read_extent(
    header: &(impl KeywordProvider + ?Sized),
    keyword: &str,
    sink: &mut impl DiagnosticSink,
) -> WcsResult<usize> {
    match header.get_int(keyword) {
        Some(n) if n >= 0 => Ok(n as usize),
        Some(n) => Err(WcsError::malformed(
            keyword,
            format!("negative axis length {n}"),
        )),
        None => {
            sink.emit(Diagnostic::MissingExtent {
                keyword: keyword.to_string(),
            });
            Ok(0)
        }
    }
}

fn parse_matrix(header: &(impl KeywordProvider + ?Sized)) -> WcsResult<MatrixSpec> {
    let cd = ["CD1_1", "CD1_2", "CD2_1", "CD2_2"].map(|k| header.get_float(k));
    if cd.iter().any(Option::is_some) {
        let [cd11, cd12, cd21, cd22] = cd.map(|v| v.unwrap_or(0.0));
        return Ok(MatrixSpec::Cd([[cd11, cd12], [cd21, cd22]]));
    }

    let cdelt = ["CDELT1", "CDELT2"].map(|k| header.get_float(k));
    let pc = ["PC1_1", "PC1_2", "PC2_1", "PC2_2"].map(|k| header.get_float(k));
    let crota = header.get_float("CROTA2");
    let has_pc = pc.iter().any(Option::is_some);
    if has_pc || cdelt.iter().any(Option::is_some) || crota.is_some() {
        // an absent CDELTi scales its axis by 1
        let cdelt = cdelt.map(|c| c.unwrap_or(1.0));
        if let (false, Some(crota_deg)) = (has_pc, crota) {
            return Ok(MatrixSpec::CdeltCrota { cdelt, crota_deg });
        }
        let [pc11, pc12, pc21, pc22] = pc;
        return Ok(MatrixSpec::PcCdelt {
            pc: [
                [pc11.unwrap_or(1.0), pc12.unwrap_or(0.0)],
                [pc21.unwrap_or(0.0), pc22.unwrap_or(1.0)],
            ],
            cdelt,
        });
    }

    Err(WcsError::malformed(
        "CD1_1",
        "no transformation matrix found (CD, PC+CDELT or CDELT+CROTA2)",
    ))
}
