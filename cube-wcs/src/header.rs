use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{WcsError, WcsResult};

/// Read access to a coordinate-metadata record.
///
/// Keyword names follow the FITS conventions (`CRPIX1`, `CD1_2`, `CUNIT3`,
/// ...), with 1-based pixel positions.
pub trait KeywordProvider {
    fn get_string(&self, key: &str) -> Option<String>;
    fn get_float(&self, key: &str) -> Option<f64>;
    fn get_int(&self, key: &str) -> Option<i64>;

    fn require_float(&self, key: &str) -> WcsResult<f64> {
        self.get_float(key)
            .ok_or_else(|| WcsError::missing_keyword(key))
    }

    fn require_int(&self, key: &str) -> WcsResult<i64> {
        self.get_int(key)
            .ok_or_else(|| WcsError::missing_keyword(key))
    }

    fn has_float(&self, key: &str) -> bool {
        self.get_float(key).is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeywordMap {
    strings: HashMap<String, String>,
    floats: HashMap<String, f64>,
    ints: HashMap<String, i64>,
}

impl KeywordMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keywords(keywords: &[WcsKeyword]) -> Self {
        let mut map = Self::new();
        for keyword in keywords {
            map.insert(keyword.clone());
        }
        map
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.strings.insert(key.into(), value.into());
        self
    }

    pub fn set_float(&mut self, key: impl Into<String>, value: f64) -> &mut Self {
        self.floats.insert(key.into(), value);
        self
    }

    pub fn set_int(&mut self, key: impl Into<String>, value: i64) -> &mut Self {
        self.ints.insert(key.into(), value);
        self
    }

    pub fn insert(&mut self, keyword: WcsKeyword) -> &mut Self {
        match keyword.value {
            WcsKeywordValue::Real(v) => self.set_float(keyword.name, v),
            WcsKeywordValue::Integer(v) => self.set_int(keyword.name, v),
            WcsKeywordValue::String(v) => self.set_string(keyword.name, v),
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let s = self.strings.remove(key).is_some();
        let f = self.floats.remove(key).is_some();
        let i = self.ints.remove(key).is_some();
        s || f || i
    }

    pub fn len(&self) -> usize {
        self.strings.len() + self.floats.len() + self.ints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeywordProvider for KeywordMap {
    fn get_string(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }

    // Integer cards are valid wherever a real value is expected.
    fn get_float(&self, key: &str) -> Option<f64> {
        self.floats
            .get(key)
            .copied()
            .or_else(|| self.ints.get(key).map(|&v| v as f64))
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.ints.get(key).copied().or_else(|| {
            self.floats
                .get(key)
                .filter(|v| v.fract() == 0.0)
                .map(|&v| v as i64)
        })
    }
}

impl KeywordProvider for [WcsKeyword] {
    fn get_string(&self, key: &str) -> Option<String> {
        self.iter().find(|k| k.name == key).and_then(|k| match &k.value {
            WcsKeywordValue::String(s) => Some(s.clone()),
            _ => None,
        })
    }

    fn get_float(&self, key: &str) -> Option<f64> {
        self.iter().find(|k| k.name == key).and_then(|k| match k.value {
            WcsKeywordValue::Real(v) => Some(v),
            WcsKeywordValue::Integer(v) => Some(v as f64),
            WcsKeywordValue::String(_) => None,
        })
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.iter().find(|k| k.name == key).and_then(|k| match k.value {
            WcsKeywordValue::Integer(v) => Some(v),
            WcsKeywordValue::Real(v) if v.fract() == 0.0 => Some(v as i64),
            _ => None,
        })
    }
}

impl KeywordProvider for Vec<WcsKeyword> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.as_slice().get_string(key)
    }

    fn get_float(&self, key: &str) -> Option<f64> {
        self.as_slice().get_float(key)
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.as_slice().get_int(key)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WcsKeywordValue {
    Real(f64),
    Integer(i64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WcsKeyword {
    pub name: String,
    pub value: WcsKeywordValue,
}

impl WcsKeyword {
    pub fn real(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: WcsKeywordValue::Real(value),
        }
    }

    pub fn integer(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value: WcsKeywordValue::Integer(value),
        }
    }

    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: WcsKeywordValue::String(value.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_map_strings() {
        let mut map = KeywordMap::new();
        map.set_string("CTYPE1", "RA---TAN");
        assert_eq!(map.get_string("CTYPE1"), Some("RA---TAN".to_string()));
        assert_eq!(map.get_string("CTYPE2"), None);
    }

    #[test]
    fn test_int_readable_as_float() {
        let mut map = KeywordMap::new();
        map.set_int("NAXIS1", 40);
        assert_eq!(map.get_float("NAXIS1"), Some(40.0));
        assert_eq!(map.get_int("NAXIS1"), Some(40));
    }

    #[test]
    fn test_integral_float_readable_as_int() {
        let mut map = KeywordMap::new();
        map.set_float("NAXIS", 3.0).set_float("CRPIX1", 1.5);
        assert_eq!(map.get_int("NAXIS"), Some(3));
        assert_eq!(map.get_int("CRPIX1"), None);
    }

    #[test]
    fn test_require_float_missing() {
        let map = KeywordMap::new();
        let err = map.require_float("CRVAL1").unwrap_err();
        assert!(matches!(err, WcsError::MalformedCoordinateMetadata { .. }));
        assert!(err.to_string().contains("CRVAL1"));
    }

    #[test]
    fn test_require_int_present() {
        let mut map = KeywordMap::new();
        map.set_int("NAXIS", 2);
        assert_eq!(map.require_int("NAXIS").unwrap(), 2);
    }

    #[test]
    fn test_from_keywords_and_remove() {
        let keywords = vec![
            WcsKeyword::real("CRPIX1", 12.5),
            WcsKeyword::integer("NAXIS1", 30),
            WcsKeyword::string("CUNIT1", "deg"),
        ];
        let mut map = KeywordMap::from_keywords(&keywords);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get_float("CRPIX1"), Some(12.5));
        assert!(map.remove("CUNIT1"));
        assert!(!map.remove("CUNIT1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_keyword_slice_provider() {
        let keywords = vec![
            WcsKeyword::real("CD1_1", -0.5),
            WcsKeyword::integer("NAXIS2", 7),
            WcsKeyword::string("CTYPE1", "LINEAR"),
        ];
        assert_eq!(keywords.get_float("CD1_1"), Some(-0.5));
        assert_eq!(keywords.get_float("NAXIS2"), Some(7.0));
        assert_eq!(keywords.get_int("NAXIS2"), Some(7));
        assert_eq!(keywords.get_string("CTYPE1"), Some("LINEAR".to_string()));
        assert_eq!(keywords.get_float("CTYPE1"), None);
        assert!(keywords.has_float("CD1_1"));
        assert!(!keywords.has_float("CD2_2"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_keyword_map_json_roundtrip() {
        let mut map = KeywordMap::new();
        map.set_string("CTYPE3", "AWAV")
            .set_float("CRVAL3", 4750.0)
            .set_int("NAXIS3", 3681);
        let json = serde_json::to_string(&map).unwrap();
        let back: KeywordMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
