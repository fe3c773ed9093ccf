//! World coordinate systems for astronomical data cubes.
//!
//! A cube carries a spatial [`CelestialWcs`] (two axes, either a gnomonic
//! sky projection or a linear plane) and a spectral [`SpectralWcs`] (one
//! affine axis). Both read from and write to FITS-style keyword records and
//! support the derivations needed when the data is cut or rebinned: slicing,
//! resampling and block rebinning.
//!
//! Public pixel and world pairs are ordered `[y, x]` (row, column), i.e.
//! `[dec, ra]` on the sky. Pixel positions are 0-based array indices.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`celestial`] | [`CelestialWcs`]: pixel↔world, equality, slicing, resample/rebin |
//! | [`builder`] | [`CelestialWcsBuilder`] for parameter construction |
//! | [`spectral`] | [`SpectralWcs`] for the wavelength axis |
//! | [`axis`] | [`AffineAxisMap`], the one-dimensional linear mapping |
//! | [`linear`] | [`LinearTransform`] and the [`MatrixSpec`] header forms |
//! | [`projection`] | Linear and TAN projections, [`SphericalRotation`] |
//! | [`header`] | [`KeywordProvider`], [`KeywordMap`], [`WcsKeyword`] |
//! | [`cube`] | [`cube_keywords`] for a combined 3-axis record |
//! | [`bbox`] | [`bounding_box`] of rectangles and ellipses in pixel space |
//! | [`sexagesimal`] | Degree/sexagesimal conversion of `[dec, ra]` pairs |
//! | [`diagnostics`] | Non-fatal [`Diagnostic`]s and their sinks |
//!
//! ```
//! use cube_wcs::{CelestialWcs, KeywordMap};
//!
//! let mut header = KeywordMap::new();
//! header
//!     .set_int("NAXIS1", 325)
//!     .set_int("NAXIS2", 334)
//!     .set_string("CTYPE1", "RA---TAN")
//!     .set_string("CTYPE2", "DEC--TAN")
//!     .set_float("CRPIX1", 167.401033093)
//!     .set_float("CRPIX2", 163.017401336)
//!     .set_float("CRVAL1", 338.23092027)
//!     .set_float("CRVAL2", -60.56375796)
//!     .set_float("CD1_1", -5.5555555555555003e-05)
//!     .set_float("CD2_2", 5.5555555555555003e-05);
//!
//! let wcs = CelestialWcs::from_header(&header, &mut ()).unwrap();
//! let [dec, ra] = wcs.pixel_to_world_one([81.34, 108.41], None).unwrap();
//! assert!((dec + 60.5682).abs() < 1e-3);
//! assert!((ra - 338.2375).abs() < 1e-3);
//! ```

pub mod axis;
pub mod bbox;
pub mod builder;
pub mod celestial;
pub mod config;
pub mod coordinate;
pub mod cube;
pub mod diagnostics;
pub mod error;
pub mod header;
pub mod linear;
pub mod projection;
pub mod selection;
pub mod sexagesimal;
pub mod spectral;
pub mod summary;

pub use axis::AffineAxisMap;
pub use bbox::{bounding_box, Radii, RegionShape};
pub use builder::CelestialWcsBuilder;
pub use celestial::CelestialWcs;
pub use config::Tolerances;
pub use coordinate::{CelestialCoord, IntermediateCoord, NativeCoord, PixelCoord};
pub use cube::cube_keywords;
pub use diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
pub use error::{WcsError, WcsResult};
pub use header::{KeywordMap, KeywordProvider, WcsKeyword, WcsKeywordValue};
pub use linear::{LinearTransform, MatrixSpec};
pub use projection::{CoordType, Projection, SphericalRotation};
pub use selection::{AxisSelector, AxisSlice};
pub use spectral::{SpectralSelection, SpectralWcs};
pub use summary::{CelestialSummary, SpectralSummary};

pub use cube_core::Unit;
