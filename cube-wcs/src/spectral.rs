//! World coordinates along a single spectral axis.
//!
//! A [`SpectralWcs`] maps 0-based pixel indices to wavelengths (or any other
//! linearly sampled quantity) through an [`AffineAxisMap`], and keeps that
//! mapping consistent when the spectrum is sliced, resampled or rebinned.
//!
//! ```
//! use cube_core::Unit;
//! use cube_wcs::SpectralWcs;
//!
//! let wave = SpectralWcs::new(1.0, 1.25, 4750.0, Unit::angstrom(), "AWAV", Some(3681));
//! assert_eq!(wave.coord(4.0, None).unwrap(), 4755.0);
//! assert_eq!(wave.end(None).unwrap(), 9350.0);
//! assert_eq!(wave.pixel_nearest(4755.4, None).unwrap(), 4);
//! ```

use cube_core::Unit;

use crate::axis::{covering_extent, AffineAxisMap};
use crate::config::{close, Tolerances};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{WcsError, WcsResult};
use crate::header::{KeywordProvider, WcsKeyword};
use crate::projection::LINEAR_CTYPE;
use crate::selection::AxisSelector;
use crate::summary::SpectralSummary;

/// Result of [`SpectralWcs::select`].
#[derive(Debug, Clone, PartialEq)]
pub enum SpectralSelection {
    /// A single index selects one coordinate value.
    Value(f64),
    /// A range selects a new coordinate system.
    Axis(SpectralWcs),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpectralWcs {
    axis: AffineAxisMap,
    unit: Unit,
    shape: Option<usize>,
}

impl Default for SpectralWcs {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, Unit::angstrom(), LINEAR_CTYPE, None)
    }
}

impl SpectralWcs {
    pub fn new(
        crpix: f64,
        cdelt: f64,
        crval: f64,
        unit: Unit,
        ctype: impl Into<String>,
        shape: Option<usize>,
    ) -> Self {
        Self {
            axis: AffineAxisMap::new(crpix, crval, cdelt, ctype),
            unit,
            shape,
        }
    }

    /// Reads the spectral axis of a metadata record.
    ///
    /// The spectral axis is axis 1 of a one-dimensional record and axis 3
    /// otherwise. The dimensionality comes from `NAXIS`, falling back to
    /// `WCSAXES` when the record carries no data shape.
    pub fn from_header(header: &(impl KeywordProvider + ?Sized)) -> WcsResult<Self> {
        let (naxis, has_shape) = match header.get_int("NAXIS") {
            Some(n) => (n, true),
            None => (header.require_int("WCSAXES")?, false),
        };
        let n = if naxis == 1 { 1 } else { 3 };

        let shape = if has_shape {
            match header.get_int(&format!("NAXIS{n}")) {
                Some(len) if len >= 0 => Some(len as usize),
                Some(len) => {
                    return Err(WcsError::malformed(
                        format!("NAXIS{n}"),
                        format!("negative axis length {len}"),
                    ))
                }
                None => None,
            }
        } else {
            None
        };

        let crpix = header.require_float(&format!("CRPIX{n}"))?;
        let crval = header.require_float(&format!("CRVAL{n}"))?;
        let cdelt = read_step(header, n)?;
        let ctype = header
            .get_string(&format!("CTYPE{n}"))
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| LINEAR_CTYPE.to_string());
        let unit = match header.get_string(&format!("CUNIT{n}")) {
            Some(text) if !text.trim().is_empty() => text
                .parse::<Unit>()
                .map_err(|e| WcsError::malformed(format!("CUNIT{n}"), e.to_string()))?,
            _ => Unit::angstrom(),
        };

        tracing::debug!(axis = n, crpix, crval, cdelt, %unit, "spectral axis read from header");
        Ok(Self::new(crpix, cdelt, crval, unit, ctype, shape))
    }

    /// World value at a (possibly fractional) 0-based pixel.
    pub fn coord(&self, pixel: f64, unit: Option<&Unit>) -> WcsResult<f64> {
        Ok(self.unit.convert_to(self.axis.world(pixel), unit)?)
    }

    pub fn coords(&self, pixels: &[f64], unit: Option<&Unit>) -> WcsResult<Vec<f64>> {
        pixels.iter().map(|&p| self.coord(p, unit)).collect()
    }

    /// Coordinates of every pixel of the axis.
    pub fn all_coords(&self, unit: Option<&Unit>) -> WcsResult<Vec<f64>> {
        let len = self.require_shape("list all coordinates")?;
        (0..len).map(|i| self.coord(i as f64, unit)).collect()
    }

    /// Fractional 0-based pixel of a world value.
    pub fn pixel(&self, value: f64, unit: Option<&Unit>) -> WcsResult<f64> {
        let value = self.unit.convert_from(value, unit)?;
        Ok(self.axis.index(value))
    }

    pub fn pixels(&self, values: &[f64], unit: Option<&Unit>) -> WcsResult<Vec<f64>> {
        values.iter().map(|&v| self.pixel(v, unit)).collect()
    }

    /// Nearest pixel index, rounding half up and clamped into the axis.
    pub fn pixel_nearest(&self, value: f64, unit: Option<&Unit>) -> WcsResult<usize> {
        let pixel = (self.pixel(value, unit)? + 0.5).floor().max(0.0) as usize;
        Ok(match self.shape {
            Some(len) if len > 0 => pixel.min(len - 1),
            _ => pixel,
        })
    }

    pub fn pixels_nearest(&self, values: &[f64], unit: Option<&Unit>) -> WcsResult<Vec<usize>> {
        values.iter().map(|&v| self.pixel_nearest(v, unit)).collect()
    }

    /// Index or slice the axis.
    ///
    /// Slices are not clamped to the declared length: the new system simply
    /// extrapolates the linear mapping.
    pub fn select(&self, selector: impl Into<AxisSelector>) -> WcsResult<SpectralSelection> {
        let selector: AxisSelector = selector.into();
        match selector {
            AxisSelector::Index(index) => {
                let pixel = if index >= 0 {
                    index
                } else {
                    self.require_shape("index from the end of the axis")? as isize + index
                };
                Ok(SpectralSelection::Value(self.coord(pixel as f64, None)?))
            }
            AxisSelector::Range(slice) => {
                let positions = slice.positions(self.shape)?;
                if positions.len() < 2 {
                    return Err(WcsError::insufficient_points(positions.len()));
                }
                let first = self.axis.world(positions[0] as f64);
                let second = self.axis.world(positions[1] as f64);
                Ok(SpectralSelection::Axis(Self::new(
                    1.0,
                    second - first,
                    first,
                    self.unit.clone(),
                    self.axis.ctype.clone(),
                    Some(positions.len()),
                )))
            }
        }
    }

    /// A new system with the given step whose first pixel is centred on
    /// `start`, covering the same range as this one.
    ///
    /// Without `start` the new first pixel begins where the current first
    /// pixel begins. A negative step runs the new axis the other way.
    pub fn resample(&self, step: f64, start: Option<f64>, unit: Option<&Unit>) -> WcsResult<Self> {
        if !step.is_finite() || step == 0.0 {
            return Err(WcsError::invalid_parameter(format!(
                "resampling step must be finite and nonzero, got {step}"
            )));
        }
        let len = self.require_shape("resample")?;
        let step = self.unit.convert_from(step, unit)?;
        let old_step = self.axis.cdelt;
        let old_start = self.axis.world(0.0);
        let start = match start {
            Some(start) => self.unit.convert_from(start, unit)?,
            None => old_start - 0.5 * old_step + 0.5 * step,
        };

        let shape = covering_extent(len, old_step, start, old_start, step);

        tracing::debug!(step, start, shape, "resampled spectral axis");
        Ok(Self::new(
            1.0,
            step,
            start,
            self.unit.clone(),
            self.axis.ctype.clone(),
            Some(shape),
        ))
    }

    /// Multiplies the step by `factor` in place, keeping the outer edge of
    /// the first pixel fixed. Trailing pixels that do not fill a whole new
    /// pixel are dropped and reported.
    pub fn rebin(&mut self, factor: usize, sink: &mut impl DiagnosticSink) -> WcsResult<()> {
        if factor == 0 {
            return Err(WcsError::invalid_parameter("rebinning factor must be at least 1"));
        }
        let len = self.require_shape("rebin")?;

        let old_step = self.axis.cdelt;
        let step = old_step * factor as f64;
        let crpix = if step == 0.0 {
            self.axis.crpix
        } else {
            (self.axis.crpix * old_step - old_step / 2.0 + step / 2.0) / step
        };

        if len % factor != 0 {
            sink.emit(Diagnostic::RebinRemainder {
                axis: "spectral",
                extent: len,
                factor,
            });
        }

        let axis = AffineAxisMap {
            crpix,
            cdelt: step,
            ..self.axis.clone()
        };
        self.axis = axis;
        self.shape = Some(len / factor);
        Ok(())
    }

    pub fn is_equal(&self, other: &Self) -> bool {
        self.is_equal_with(other, &Tolerances::DEFAULT)
    }

    /// Same length, same axis type, and first value and step equal within
    /// tolerance after converting `other` into this system's unit.
    pub fn is_equal_with(&self, other: &Self, tolerances: &Tolerances) -> bool {
        if self.shape != other.shape || self.axis.ctype != other.axis.ctype {
            return false;
        }
        let (Ok(start), Ok(step)) = (
            other.coord(0.0, Some(&self.unit)),
            other.step(Some(&self.unit)),
        ) else {
            return false;
        };
        close(self.axis.world(0.0), start, tolerances.spectral_value)
            && close(self.axis.cdelt, step, tolerances.spectral_step)
    }

    /// Adopts the length of the data the axis is attached to.
    pub fn fit_to_length(&mut self, len: usize, sink: &mut impl DiagnosticSink) {
        if let Some(current) = self.shape {
            if current != len {
                sink.emit(Diagnostic::ShapeAdjusted {
                    from: vec![current],
                    to: vec![len],
                });
            }
        }
        self.shape = Some(len);
    }

    pub fn step(&self, unit: Option<&Unit>) -> WcsResult<f64> {
        Ok(self.unit.convert_to(self.axis.cdelt, unit)?)
    }

    pub fn set_step(&mut self, step: f64, unit: Option<&Unit>) -> WcsResult<()> {
        self.axis.cdelt = self.unit.convert_from(step, unit)?;
        Ok(())
    }

    /// Value of the first pixel.
    pub fn start(&self, unit: Option<&Unit>) -> WcsResult<f64> {
        self.coord(0.0, unit)
    }

    /// Value of the last pixel.
    pub fn end(&self, unit: Option<&Unit>) -> WcsResult<f64> {
        let len = self.require_shape("compute the last coordinate")?;
        self.coord(len as f64 - 1.0, unit)
    }

    /// `[first, last]` coordinate values.
    pub fn range(&self, unit: Option<&Unit>) -> WcsResult<[f64; 2]> {
        Ok([self.start(unit)?, self.end(unit)?])
    }

    #[inline]
    pub fn crpix(&self) -> f64 {
        self.axis.crpix
    }

    pub fn set_crpix(&mut self, crpix: f64) {
        self.axis.crpix = crpix;
    }

    pub fn crval(&self, unit: Option<&Unit>) -> WcsResult<f64> {
        Ok(self.unit.convert_to(self.axis.crval, unit)?)
    }

    pub fn set_crval(&mut self, crval: f64, unit: Option<&Unit>) -> WcsResult<()> {
        self.axis.crval = self.unit.convert_from(crval, unit)?;
        Ok(())
    }

    #[inline]
    pub fn ctype(&self) -> &str {
        &self.axis.ctype
    }

    #[inline]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    #[inline]
    pub fn shape(&self) -> Option<usize> {
        self.shape
    }

    pub fn set_shape(&mut self, shape: Option<usize>) {
        self.shape = shape;
    }

    #[inline]
    pub fn axis_map(&self) -> &AffineAxisMap {
        &self.axis
    }

    /// Metadata keywords for this axis written as axis number `naxis`.
    ///
    /// With `use_cd` on a three-axis record the step is written as `CD3_3`
    /// together with zero cross terms, matching a spatial part written in CD
    /// form; otherwise it is written as `CDELTn`.
    pub fn to_keywords(&self, naxis: usize, use_cd: bool) -> Vec<WcsKeyword> {
        let mut keywords = vec![
            WcsKeyword::integer("WCSAXES", naxis as i64),
            WcsKeyword::real(format!("CRVAL{naxis}"), self.axis.crval),
            WcsKeyword::real(format!("CRPIX{naxis}"), self.axis.crpix),
            WcsKeyword::string(format!("CUNIT{naxis}"), self.unit.symbol()),
            WcsKeyword::string(format!("CTYPE{naxis}"), self.axis.ctype.clone()),
        ];
        if use_cd && naxis == 3 {
            keywords.extend([
                WcsKeyword::real("CD3_3", self.axis.cdelt),
                WcsKeyword::real("CD1_3", 0.0),
                WcsKeyword::real("CD2_3", 0.0),
                WcsKeyword::real("CD3_1", 0.0),
                WcsKeyword::real("CD3_2", 0.0),
            ]);
        } else {
            keywords.push(WcsKeyword::real(format!("CDELT{naxis}"), self.axis.cdelt));
        }
        keywords
    }

    /// First value, last value (when the length is known) and step.
    pub fn summary(&self) -> SpectralSummary {
        SpectralSummary {
            start: self.axis.world(0.0),
            end: self.shape.map(|len| self.axis.world(len as f64 - 1.0)),
            step: self.axis.cdelt,
            unit: self.unit.symbol().to_string(),
        }
    }

    fn require_shape(&self, operation: &str) -> WcsResult<usize> {
        self.shape.ok_or_else(|| WcsError::missing_length(operation))
    }
}

fn read_step(header: &(impl KeywordProvider + ?Sized), n: usize) -> WcsResult<f64> {
    if let Some(cd) = header.get_float(&format!("CD{n}_{n}")) {
        return Ok(cd);
    }
    match (
        header.get_float(&format!("CDELT{n}")),
        header.get_float(&format!("PC{n}_{n}")),
    ) {
        (None, None) => Err(WcsError::malformed(
            format!("CD{n}_{n}"),
            format!("no step found (CD{n}_{n}, CDELT{n} or PC{n}_{n})"),
        )),
        // a missing CDELT or PC defaults to 1
        (cdelt, pc) => Ok(cdelt.unwrap_or(1.0) * pc.unwrap_or(1.0)),
    }
}
