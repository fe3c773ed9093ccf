//! Sexagesimal strings for `[dec, ra]` coordinate pairs.
//!
//! Declinations are written as `DD:MM:SS.sss` and right ascensions as
//! `HH:MM:SS.sss`.

use cube_core::angle::{parse_dms, parse_hms, DmsFmt, HmsFmt};
use cube_core::Angle;

use crate::error::WcsResult;

const FRAC_DIGITS: u8 = 3;

/// `[dec, ra]` in degrees to `[dec, ra]` strings.
pub fn deg_to_sexa(coord: [f64; 2]) -> [String; 2] {
    [
        DmsFmt { frac_digits: FRAC_DIGITS }.fmt(Angle::from_degrees(coord[0])),
        HmsFmt { frac_digits: FRAC_DIGITS }.fmt(Angle::from_degrees(coord[1])),
    ]
}

pub fn deg_to_sexa_all(coords: &[[f64; 2]]) -> Vec<[String; 2]> {
    coords.iter().map(|&c| deg_to_sexa(c)).collect()
}

/// `[dec, ra]` strings to `[dec, ra]` in degrees.
pub fn sexa_to_deg(coord: [&str; 2]) -> WcsResult<[f64; 2]> {
    let dec = parse_dms(coord[0])?;
    let ra = parse_hms(coord[1])?;
    Ok([dec.degrees(), ra.degrees()])
}

pub fn sexa_to_deg_all(coords: &[[&str; 2]]) -> WcsResult<Vec<[f64; 2]>> {
    coords.iter().map(|&c| sexa_to_deg(c)).collect()
}
