//! Physical units for world-coordinate values.
//!
//! A [`Unit`] is a symbol, a base unit and a multiplicative factor. Angles
//! and lengths are carried as [`uom`] quantities when converting between
//! base units, so deg↔arcsec and Å↔nm↔µm use the SI definitions; pixel
//! coordinates only scale by their factor.
//!
//! ```
//! use cube_core::Unit;
//!
//! let nm = Unit::nanometre();
//! let aa = Unit::angstrom();
//! assert!((aa.convert(2.5, &nm).unwrap() - 0.25).abs() < 1e-12);
//! assert!((Unit::degree().convert(1.0, &Unit::arcsecond()).unwrap() - 3600.0).abs() < 1e-9);
//! ```
//!
//! Units can also be parsed from metadata strings, including the spellings
//! commonly found in FITS headers (`deg`, `Angstrom`, `um`, `pixel`, ...) and a
//! leading numeric factor (`2 pix`).

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use uom::si::angle::{degree, minute, radian, second};
use uom::si::f64::{Angle as PlaneAngle, Length};
use uom::si::length::{angstrom, centimeter, meter, micrometer, millimeter, nanometer};

use crate::errors::{CoreError, CoreResult};

/// Physical dimension of a unit. Only units of equal dimension convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Angle,
    Length,
    Pixel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AngleUnit {
    Degree,
    Arcminute,
    Arcsecond,
    Radian,
}

impl AngleUnit {
    fn quantity(self, value: f64) -> PlaneAngle {
        match self {
            Self::Degree => PlaneAngle::new::<degree>(value),
            Self::Arcminute => PlaneAngle::new::<minute>(value),
            Self::Arcsecond => PlaneAngle::new::<second>(value),
            Self::Radian => PlaneAngle::new::<radian>(value),
        }
    }

    fn value(self, angle: PlaneAngle) -> f64 {
        match self {
            Self::Degree => angle.get::<degree>(),
            Self::Arcminute => angle.get::<minute>(),
            Self::Arcsecond => angle.get::<second>(),
            Self::Radian => angle.get::<radian>(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LengthUnit {
    Metre,
    Centimetre,
    Millimetre,
    Micrometre,
    Nanometre,
    Angstrom,
}

impl LengthUnit {
    fn quantity(self, value: f64) -> Length {
        match self {
            Self::Metre => Length::new::<meter>(value),
            Self::Centimetre => Length::new::<centimeter>(value),
            Self::Millimetre => Length::new::<millimeter>(value),
            Self::Micrometre => Length::new::<micrometer>(value),
            Self::Nanometre => Length::new::<nanometer>(value),
            Self::Angstrom => Length::new::<angstrom>(value),
        }
    }

    fn value(self, length: Length) -> f64 {
        match self {
            Self::Metre => length.get::<meter>(),
            Self::Centimetre => length.get::<centimeter>(),
            Self::Millimetre => length.get::<millimeter>(),
            Self::Micrometre => length.get::<micrometer>(),
            Self::Nanometre => length.get::<nanometer>(),
            Self::Angstrom => length.get::<angstrom>(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Base {
    Angle(AngleUnit),
    Length(LengthUnit),
    Pixel,
}

impl Base {
    const fn dimension(self) -> Dimension {
        match self {
            Self::Angle(_) => Dimension::Angle,
            Self::Length(_) => Dimension::Length,
            Self::Pixel => Dimension::Pixel,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Unit {
    symbol: Cow<'static, str>,
    base: Base,
    factor: f64,
}

impl Unit {
    const fn fixed(symbol: &'static str, base: Base, factor: f64) -> Self {
        Self {
            symbol: Cow::Borrowed(symbol),
            base,
            factor,
        }
    }

    pub const fn degree() -> Self {
        Self::fixed("deg", Base::Angle(AngleUnit::Degree), 1.0)
    }

    pub const fn arcminute() -> Self {
        Self::fixed("arcmin", Base::Angle(AngleUnit::Arcminute), 1.0)
    }

    pub const fn arcsecond() -> Self {
        Self::fixed("arcsec", Base::Angle(AngleUnit::Arcsecond), 1.0)
    }

    pub const fn milliarcsecond() -> Self {
        Self::fixed("mas", Base::Angle(AngleUnit::Arcsecond), 1.0e-3)
    }

    pub const fn radian() -> Self {
        Self::fixed("rad", Base::Angle(AngleUnit::Radian), 1.0)
    }

    pub const fn metre() -> Self {
        Self::fixed("m", Base::Length(LengthUnit::Metre), 1.0)
    }

    pub const fn centimetre() -> Self {
        Self::fixed("cm", Base::Length(LengthUnit::Centimetre), 1.0)
    }

    pub const fn millimetre() -> Self {
        Self::fixed("mm", Base::Length(LengthUnit::Millimetre), 1.0)
    }

    pub const fn micrometre() -> Self {
        Self::fixed("um", Base::Length(LengthUnit::Micrometre), 1.0)
    }

    pub const fn nanometre() -> Self {
        Self::fixed("nm", Base::Length(LengthUnit::Nanometre), 1.0)
    }

    pub const fn angstrom() -> Self {
        Self::fixed("Angstrom", Base::Length(LengthUnit::Angstrom), 1.0)
    }

    pub const fn pixel() -> Self {
        Self::fixed("pixel", Base::Pixel, 1.0)
    }

    /// A multiple of this unit, e.g. `Unit::pixel().scaled(2.0)` is "2 pixel".
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            symbol: Cow::Owned(format!("{} {}", factor, self.symbol)),
            base: self.base,
            factor: self.factor * factor,
        }
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.base.dimension()
    }

    #[inline]
    pub fn is_angle(&self) -> bool {
        self.dimension() == Dimension::Angle
    }

    #[inline]
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension() == other.dimension()
    }

    /// Converts `value` expressed in `self` into `to`.
    ///
    /// Equal units return `value` untouched. Otherwise the value is scaled by
    /// this unit's factor, moved between base units through a `uom` quantity
    /// and divided by the target factor.
    pub fn convert(&self, value: f64, to: &Unit) -> CoreResult<f64> {
        if !self.is_compatible(to) {
            return Err(CoreError::incompatible_units(self.symbol(), to.symbol()));
        }
        if self == to {
            return Ok(value);
        }
        let value = value * self.factor;
        let value = match (self.base, to.base) {
            (Base::Angle(from), Base::Angle(into)) if from != into => {
                into.value(from.quantity(value))
            }
            (Base::Length(from), Base::Length(into)) if from != into => {
                into.value(from.quantity(value))
            }
            _ => value,
        };
        Ok(value / to.factor)
    }

    /// Converts a value from `from` (when given) into this unit.
    ///
    /// `None` means the value is already in this unit.
    pub fn convert_from(&self, value: f64, from: Option<&Unit>) -> CoreResult<f64> {
        match from {
            Some(unit) => unit.convert(value, self),
            None => Ok(value),
        }
    }

    /// Converts a value in this unit into `to` (when given).
    pub fn convert_to(&self, value: f64, to: Option<&Unit>) -> CoreResult<f64> {
        match to {
            Some(unit) => self.convert(value, unit),
            None => Ok(value),
        }
    }

    fn parse_symbol(symbol: &str) -> Option<Self> {
        let unit = match symbol.to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Self::degree(),
            "arcmin" | "arcminute" | "arcminutes" => Self::arcminute(),
            "arcsec" | "arcsecond" | "arcseconds" => Self::arcsecond(),
            "mas" => Self::milliarcsecond(),
            "rad" | "radian" | "radians" => Self::radian(),
            "m" | "meter" | "metre" | "meters" | "metres" => Self::metre(),
            "cm" => Self::centimetre(),
            "mm" => Self::millimetre(),
            "um" | "micron" | "microns" | "µm" => Self::micrometre(),
            "nm" | "nanometer" | "nanometre" => Self::nanometre(),
            "angstrom" | "angstroms" | "angstroem" | "aa" | "å" => Self::angstrom(),
            "pixel" | "pixels" | "pix" => Self::pixel(),
            _ => return None,
        };
        Some(unit)
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.factor == other.factor
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

impl FromStr for Unit {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim().trim_matches('\'').trim();
        if let Some(unit) = Self::parse_symbol(trimmed) {
            return Ok(unit);
        }

        if let Some((factor, rest)) = trimmed.split_once(char::is_whitespace) {
            if let (Ok(factor), Some(unit)) = (factor.parse::<f64>(), Self::parse_symbol(rest.trim()))
            {
                return Ok(unit.scaled(factor));
            }
        }

        Err(CoreError::unknown_unit(s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_angle_conversions() {
        let arcsec = Unit::arcsecond();
        assert_relative_eq!(Unit::degree().convert(1.0, &arcsec).unwrap(), 3600.0, max_relative = 1e-12);
        assert_relative_eq!(arcsec.convert(1800.0, &Unit::degree()).unwrap(), 0.5, max_relative = 1e-12);
        assert_relative_eq!(Unit::arcminute().convert(30.0, &Unit::degree()).unwrap(), 0.5, max_relative = 1e-12);
        assert_relative_eq!(Unit::milliarcsecond().convert(2500.0, &arcsec).unwrap(), 2.5, max_relative = 1e-12);
        let rad = Unit::degree().convert(180.0, &Unit::radian()).unwrap();
        assert_abs_diff_eq!(rad, std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_spectral_conversions() {
        let nm = Unit::nanometre();
        let aa = Unit::angstrom();
        assert_relative_eq!(aa.convert(2.5, &nm).unwrap(), 0.25, max_relative = 1e-12);
        assert_relative_eq!(aa.convert(20.0, &nm).unwrap(), 2.0, max_relative = 1e-12);
        assert_relative_eq!(aa.convert(1.25, &nm).unwrap(), 0.125, max_relative = 1e-12);
        assert_relative_eq!(nm.convert(2.0, &aa).unwrap(), 20.0, max_relative = 1e-12);
        assert_relative_eq!(Unit::micrometre().convert(0.5, &nm).unwrap(), 500.0, max_relative = 1e-12);
        assert_relative_eq!(Unit::metre().convert(1.0, &aa).unwrap(), 1.0e10, max_relative = 1e-12);
    }

    #[test]
    fn test_same_unit_is_identity() {
        let value = 338.23092027;
        assert_eq!(Unit::degree().convert(value, &Unit::degree()).unwrap(), value);
        assert_eq!("degrees".parse::<Unit>().unwrap().convert(value, &Unit::degree()).unwrap(), value);
        assert_eq!(Unit::angstrom().convert(4750.0, &Unit::angstrom()).unwrap(), 4750.0);
    }

    #[test]
    fn test_incompatible_dimensions() {
        let err = Unit::degree().convert(1.0, &Unit::pixel()).unwrap_err();
        assert_eq!(err, CoreError::incompatible_units("deg", "pixel"));
    }

    #[test]
    fn test_scaled_unit() {
        let two_pix = Unit::pixel().scaled(2.0);
        assert_eq!(two_pix.convert(-2.0, &Unit::pixel()).unwrap(), -4.0);
        assert_eq!(two_pix.symbol(), "2 pixel");
    }

    #[test]
    fn test_parse_fits_spellings() {
        assert_eq!("deg".parse::<Unit>().unwrap(), Unit::degree());
        assert_eq!("Angstrom".parse::<Unit>().unwrap(), Unit::angstrom());
        assert_eq!("ANGSTROM".parse::<Unit>().unwrap(), Unit::angstrom());
        assert_eq!(" nm ".parse::<Unit>().unwrap(), Unit::nanometre());
        assert_eq!("micron".parse::<Unit>().unwrap(), Unit::micrometre());
        assert_eq!("pix".parse::<Unit>().unwrap(), Unit::pixel());
        assert_eq!("'arcsec'".parse::<Unit>().unwrap(), Unit::arcsecond());
    }

    #[test]
    fn test_parse_scaled() {
        let unit = "2 pix".parse::<Unit>().unwrap();
        assert_eq!(unit, Unit::pixel().scaled(2.0));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "furlong".parse::<Unit>().unwrap_err();
        assert_eq!(err, CoreError::unknown_unit("furlong"));
    }

    #[test]
    fn test_equality_ignores_spelling() {
        let a: Unit = "degrees".parse().unwrap();
        assert_eq!(a, Unit::degree());
        assert_eq!(a.symbol(), "deg");
    }

    #[test]
    fn test_convert_from_and_to_optional() {
        let nm = Unit::nanometre();
        assert_relative_eq!(nm.convert_from(20.0, Some(&Unit::angstrom())).unwrap(), 2.0, max_relative = 1e-12);
        assert_eq!(nm.convert_from(20.0, None).unwrap(), 20.0);
        assert_relative_eq!(nm.convert_to(2.0, Some(&Unit::angstrom())).unwrap(), 20.0, max_relative = 1e-12);
        assert_eq!(nm.convert_to(2.0, None).unwrap(), 2.0);
    }
}
