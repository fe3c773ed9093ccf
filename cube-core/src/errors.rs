//! Error types for unit handling and angle notation.
//!
//! [`CoreError`] covers the three ways a value can fail to be interpreted:
//! an unrecognised unit string, a conversion between units of different
//! physical dimensions, and malformed sexagesimal text.
//!
//! ```
//! use cube_core::{CoreError, Unit};
//!
//! let err = Unit::degree().convert(1.0, &Unit::nanometre()).unwrap_err();
//! assert!(matches!(err, CoreError::IncompatibleUnits { .. }));
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The unit string is not one this crate knows how to scale.
    #[error("Unknown unit '{unit}'")]
    UnknownUnit { unit: String },

    /// Conversion requested between different physical dimensions.
    #[error("Cannot convert from '{from}' to '{to}': incompatible dimensions")]
    IncompatibleUnits { from: String, to: String },

    /// Sexagesimal text could not be parsed.
    #[error("Invalid sexagesimal value '{input}': {message}")]
    InvalidSexagesimal { input: String, message: String },
}

/// Convenience alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn unknown_unit(unit: impl Into<String>) -> Self {
        Self::UnknownUnit { unit: unit.into() }
    }

    pub fn incompatible_units(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::IncompatibleUnits {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn invalid_sexagesimal(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSexagesimal {
            input: input.into(),
            message: message.into(),
        }
    }
}
