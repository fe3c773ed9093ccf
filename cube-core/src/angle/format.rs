//! Sexagesimal formatting.
//!
//! Both formatters produce colon-separated, zero-padded fields with a fixed
//! number of fractional digits on the seconds: declinations as
//! `[-]DD:MM:SS.sss` and right ascensions as `HH:MM:SS.sss`.
//!
//! ```
//! use cube_core::Angle;
//! use cube_core::angle::{DmsFmt, HmsFmt};
//!
//! let dms = DmsFmt { frac_digits: 3 };
//! assert_eq!(dms.fmt(Angle::from_degrees(-26.07862)), "-26:04:43.032");
//!
//! let hms = HmsFmt { frac_digits: 3 };
//! assert_eq!(hms.fmt(Angle::from_degrees(357.92195)), "23:51:41.268");
//! ```

use super::Angle;

/// Degrees-minutes-seconds formatter. Negative values carry a leading `-`.
#[derive(Debug, Clone, Copy)]
pub struct DmsFmt {
    pub frac_digits: u8,
}

/// Hours-minutes-seconds formatter. Values are wrapped into `[0, 24h)`.
#[derive(Debug, Clone, Copy)]
pub struct HmsFmt {
    pub frac_digits: u8,
}

struct Fields {
    whole: u64,
    min: u64,
    sec: u64,
    frac: u64,
}

// Rounds once on the total count of fractional seconds so a value such as
// 59.9996" carries into the minutes instead of printing "60.000".
fn split(value: f64, frac_digits: u8) -> Fields {
    let scale = 10u64.pow(frac_digits as u32);
    let total = libm::round(value.abs() * 3600.0 * scale as f64) as u64;
    let secs = total / scale;
    Fields {
        whole: secs / 3600,
        min: (secs / 60) % 60,
        sec: secs % 60,
        frac: total % scale,
    }
}

fn join(sign: &str, f: &Fields, frac_digits: u8) -> String {
    if frac_digits == 0 {
        format!("{sign}{:02}:{:02}:{:02}", f.whole, f.min, f.sec)
    } else {
        format!(
            "{sign}{:02}:{:02}:{:02}.{:0width$}",
            f.whole,
            f.min,
            f.sec,
            f.frac,
            width = frac_digits as usize
        )
    }
}

impl DmsFmt {
    pub fn fmt(&self, a: Angle) -> String {
        let fields = split(a.degrees(), self.frac_digits);
        let is_zero = fields.whole == 0 && fields.min == 0 && fields.sec == 0 && fields.frac == 0;
        let sign = if a.degrees() < 0.0 && !is_zero { "-" } else { "" };
        join(sign, &fields, self.frac_digits)
    }
}

impl HmsFmt {
    pub fn fmt(&self, a: Angle) -> String {
        let hours = a.hours().rem_euclid(24.0);
        let mut fields = split(hours, self.frac_digits);
        fields.whole %= 24;
        join("", &fields, self.frac_digits)
    }
}
