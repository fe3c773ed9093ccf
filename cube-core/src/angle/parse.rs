//! Sexagesimal parsing.
//!
//! Accepts three fields separated by colons, whitespace or unit markers:
//!
//! ```text
//! 23:51:41.268     23h51m41.268s     23 51 41.268
//! -26:04:43.032    -26d04m43.032s    -26°04'43.032"
//! ```
//!
//! A sign is only accepted in front of the first field.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Angle;
use crate::constants::DEG_PER_HOUR;
use crate::errors::{CoreError, CoreResult};

static SEXAGESIMAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?x)
        ^\s*
        ([+-])?                         # sign
        (\d{1,3})                       # degrees or hours
        (?:\s*[:dDhH°ʰ]\s*|\s+)         # separator
        (\d{1,2})                       # minutes
        (?:\s*[:mM'ᵐ]\s*|\s+)           # separator
        (\d{1,2}(?:\.\d*)?)             # seconds
        \s*(?:[sS"ˢ]|'')?               # optional trailing marker
        \s*$
        "#,
    )
    .expect("sexagesimal pattern is valid")
});

struct Parts {
    negative: bool,
    whole: f64,
    min: f64,
    sec: f64,
}

fn split(s: &str) -> CoreResult<Parts> {
    let caps = SEXAGESIMAL_REGEX
        .captures(s)
        .ok_or_else(|| CoreError::invalid_sexagesimal(s, "expected three fields"))?;

    let number = |i: usize| -> CoreResult<f64> {
        caps[i]
            .parse::<f64>()
            .map_err(|_| CoreError::invalid_sexagesimal(s, "field is not a number"))
    };

    let parts = Parts {
        negative: caps.get(1).map(|m| m.as_str() == "-").unwrap_or(false),
        whole: number(2)?,
        min: number(3)?,
        sec: number(4)?,
    };

    if parts.min >= 60.0 {
        return Err(CoreError::invalid_sexagesimal(s, "minutes must be below 60"));
    }
    if parts.sec >= 60.0 {
        return Err(CoreError::invalid_sexagesimal(s, "seconds must be below 60"));
    }
    Ok(parts)
}

fn combine(p: &Parts) -> f64 {
    let value = p.whole + p.min / 60.0 + p.sec / 3600.0;
    if p.negative {
        -value
    } else {
        value
    }
}

/// Parses `[-]DD:MM:SS.sss` into an angle.
pub fn parse_dms(s: &str) -> CoreResult<Angle> {
    split(s).map(|p| Angle::from_degrees(combine(&p)))
}

/// Parses `HH:MM:SS.sss` (hours) into an angle.
pub fn parse_hms(s: &str) -> CoreResult<Angle> {
    let parts = split(s)?;
    if parts.whole >= 24.0 {
        return Err(CoreError::invalid_sexagesimal(s, "hours must be below 24"));
    }
    Ok(Angle::from_degrees(combine(&parts) * DEG_PER_HOUR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_dms_colon() {
        let a = parse_dms("-26:04:43.032").unwrap();
        assert_abs_diff_eq!(a.degrees(), -26.07862, epsilon = 1e-9);
    }

    #[test]
    fn test_parse_hms_colon() {
        let a = parse_hms("23:51:41.268").unwrap();
        assert_abs_diff_eq!(a.degrees(), 357.92195, epsilon = 1e-9);
    }

    #[test]
    fn test_parse_letter_markers() {
        let a = parse_hms("12h30m15s").unwrap();
        assert_abs_diff_eq!(a.hours(), 12.504166666666666, epsilon = 1e-12);
        let d = parse_dms("45d30m15s").unwrap();
        assert_abs_diff_eq!(d.degrees(), 45.504166666666666, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_symbols() {
        let d = parse_dms("-08°12'05.9\"").unwrap();
        assert_abs_diff_eq!(d.degrees(), -8.201638888888889, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_whitespace() {
        let d = parse_dms("  10 30 00 ").unwrap();
        assert_abs_diff_eq!(d.degrees(), 10.5, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_zero_degrees() {
        let d = parse_dms("-00:30:00").unwrap();
        assert_abs_diff_eq!(d.degrees(), -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_out_of_range_fields() {
        assert!(parse_dms("10:60:00").is_err());
        assert!(parse_dms("10:30:60").is_err());
        assert!(parse_hms("24:00:00").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        let err = parse_dms("not an angle").unwrap_err();
        assert!(matches!(err, CoreError::InvalidSexagesimal { .. }));
        assert!(parse_dms("12:-30:00").is_err());
        assert!(parse_dms("12:30").is_err());
    }
}
