//! Physical quantities shared by the data-cube coordinate crates.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`units`] | [`Unit`] with `uom`-backed conversion between angular, spectral and pixel units |
//! | [`angle`] | [`Angle`] plus sexagesimal formatting (`DD:MM:SS.sss`) and parsing |
//! | [`constants`] | Angle-conversion constants |
//! | [`errors`] | [`CoreError`] and [`CoreResult`] |
//!
//! ```
//! use cube_core::{Angle, Unit};
//! use cube_core::angle::HmsFmt;
//!
//! let step = Unit::degree().convert(5.5555555555555e-5, &Unit::arcsecond()).unwrap();
//! assert!((step - 0.2).abs() < 1e-9);
//!
//! let ra = Angle::from_degrees(357.92195);
//! assert_eq!(HmsFmt { frac_digits: 3 }.fmt(ra), "23:51:41.268");
//! ```

pub mod angle;
pub mod constants;
pub mod errors;
pub mod units;

pub use angle::Angle;
pub use errors::{CoreError, CoreResult};
pub use units::{Dimension, Unit};
