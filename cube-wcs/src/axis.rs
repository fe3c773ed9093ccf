/// One-dimensional affine mapping between a 0-based index and a world value.
///
/// `world(i) = crval + cdelt * (i + 1 - crpix)`, where `crpix` is 1-based.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineAxisMap {
    pub crpix: f64,
    pub crval: f64,
    pub cdelt: f64,
    pub ctype: String,
}

impl AffineAxisMap {
    pub fn new(crpix: f64, crval: f64, cdelt: f64, ctype: impl Into<String>) -> Self {
        Self {
            crpix,
            crval,
            cdelt,
            ctype: ctype.into(),
        }
    }

    #[inline]
    pub fn world(&self, index: f64) -> f64 {
        self.crval + self.cdelt * (index + 1.0 - self.crpix)
    }

    /// Fractional 0-based index of `value`. A zero step has no inverse and
    /// yields a non-finite result.
    #[inline]
    pub fn index(&self, value: f64) -> f64 {
        (value - self.crval) / self.cdelt + self.crpix - 1.0
    }
}

/// Number of pixels of width `step` starting at `start` needed to reach the
/// far edge of an axis of `extent` pixels of width `old_step` starting at
/// `old_start`, never negative.
///
/// Quotients within rounding noise of an integer are taken as that integer,
/// so a unit conversion on the way in does not add a spurious pixel.
pub(crate) fn covering_extent(extent: usize, old_step: f64, start: f64, old_start: f64, step: f64) -> usize {
    let span = (extent as f64 * old_step - start + old_start) / step;
    let nearest = span.round();
    let count = if (span - nearest).abs() < 1e-9 { nearest } else { span.ceil() };
    if count > 0.0 {
        count as usize
    } else {
        0
    }
}
