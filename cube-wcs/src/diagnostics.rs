//! Non-fatal warnings raised while building or deriving coordinate systems.
//!
//! Operations that can warn take a `&mut impl DiagnosticSink` and report
//! through it; the caller decides whether to collect, log or drop them.
//!
//! ```
//! use cube_wcs::{Diagnostic, SpectralWcs};
//!
//! let mut wave = SpectralWcs::default();
//! wave.set_shape(Some(11));
//! let mut warnings: Vec<Diagnostic> = Vec::new();
//! wave.rebin(2, &mut warnings).unwrap();
//! assert_eq!(warnings.len(), 1);
//! ```

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The two spatial axes declared different (but compatible) units; the
    /// second axis was converted into the first axis's unit.
    UnitMismatch { axis1: String, axis2: String },

    /// An axis length keyword was absent and the extent defaulted to zero.
    MissingExtent { keyword: String },

    /// Rebinning dropped trailing pixels because the extent is not a multiple
    /// of the factor.
    RebinRemainder {
        axis: &'static str,
        extent: usize,
        factor: usize,
    },

    /// Declared extents disagreed with the data they were attached to.
    ShapeAdjusted {
        from: Vec<usize>,
        to: Vec<usize>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnitMismatch { axis1, axis2 } => write!(
                f,
                "different units on x- and y-axes ({axis1} vs {axis2}), using {axis1}"
            ),
            Self::MissingExtent { keyword } => {
                write!(f, "{keyword} is missing, axis length set to 0")
            }
            Self::RebinRemainder {
                axis,
                extent,
                factor,
            } => write!(
                f,
                "{axis} axis of length {extent} is not a multiple of {factor}, \
                 {} trailing pixel(s) dropped",
                extent % factor
            ),
            Self::ShapeAdjusted { from, to } => write!(
                f,
                "coordinate extents {from:?} do not match data shape {to:?}, extents adjusted"
            ),
        }
    }
}

pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl DiagnosticSink for () {
    fn emit(&mut self, _diagnostic: Diagnostic) {}
}

/// Forwards every diagnostic to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(target: "cube_wcs", "{}", diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_collects() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.emit(Diagnostic::MissingExtent {
            keyword: "NAXIS1".into(),
        });
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_unit_sink_discards() {
        let mut sink = ();
        sink.emit(Diagnostic::MissingExtent {
            keyword: "NAXIS1".into(),
        });
    }

    #[test]
    fn test_forwarding_through_reference() {
        fn report(mut sink: impl DiagnosticSink) {
            sink.emit(Diagnostic::UnitMismatch {
                axis1: "deg".into(),
                axis2: "arcsec".into(),
            });
        }
        let mut collected: Vec<Diagnostic> = Vec::new();
        report(&mut collected);
        assert_eq!(collected.len(), 1);
    }

    #[test]
    fn test_display_rebin_remainder() {
        let d = Diagnostic::RebinRemainder {
            axis: "spectral",
            extent: 11,
            factor: 2,
        };
        let msg = d.to_string();
        assert!(msg.contains("11"));
        assert!(msg.contains("1 trailing"));
    }

    #[test]
    fn test_display_shape_adjusted() {
        let d = Diagnostic::ShapeAdjusted {
            from: vec![4, 5],
            to: vec![6, 5],
        };
        assert!(d.to_string().contains("[6, 5]"));
    }

    #[test]
    fn test_tracing_sink_accepts() {
        let mut sink = TracingSink;
        sink.emit(Diagnostic::MissingExtent {
            keyword: "NAXIS2".into(),
        });
    }
}
