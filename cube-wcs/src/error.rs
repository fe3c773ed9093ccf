use cube_core::CoreError;
use thiserror::Error;

pub type WcsResult<T> = Result<T, WcsError>;

#[derive(Debug, Error)]
pub enum WcsError {
    #[error("Malformed coordinate metadata '{keyword}': {message}")]
    MalformedCoordinateMetadata { keyword: String, message: String },

    #[error("No standard coordinate system: {message}")]
    NoStandardCoordinateSystem { message: String },

    #[error("Invalid coordinate shape: expected pairs of values, got {message}")]
    InvalidCoordinateShape { message: String },

    #[error("Unsupported stride {stride}: only unit steps can be sliced")]
    UnsupportedStride { stride: isize },

    #[error("Coordinate system has no declared length: cannot {operation}")]
    MissingLength { operation: String },

    #[error("Selection yields {count} point(s), at least 2 are required")]
    InsufficientPoints { count: usize },

    #[error("Invalid shape kind '{kind}': expected 'rectangle' or 'ellipse'")]
    InvalidShapeKind { kind: String },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Quantity error: {source}")]
    Core {
        #[from]
        source: CoreError,
    },
}

impl WcsError {
    pub fn malformed(keyword: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedCoordinateMetadata {
            keyword: keyword.into(),
            message: message.into(),
        }
    }

    pub fn missing_keyword(keyword: impl Into<String>) -> Self {
        Self::malformed(keyword, "required keyword is missing")
    }

    pub fn no_standard_wcs(message: impl Into<String>) -> Self {
        Self::NoStandardCoordinateSystem {
            message: message.into(),
        }
    }

    pub fn invalid_coordinate_shape(message: impl Into<String>) -> Self {
        Self::InvalidCoordinateShape {
            message: message.into(),
        }
    }

    pub fn unsupported_stride(stride: isize) -> Self {
        Self::UnsupportedStride { stride }
    }

    pub fn missing_length(operation: impl Into<String>) -> Self {
        Self::MissingLength {
            operation: operation.into(),
        }
    }

    pub fn insufficient_points(count: usize) -> Self {
        Self::InsufficientPoints { count }
    }

    pub fn invalid_shape_kind(kind: impl Into<String>) -> Self {
        Self::InvalidShapeKind { kind: kind.into() }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keyword() {
        let err = WcsError::missing_keyword("CRPIX1");
        assert!(err.to_string().contains("CRPIX1"));
        assert!(matches!(err, WcsError::MalformedCoordinateMetadata { .. }));
    }

    #[test]
    fn test_unsupported_stride() {
        let err = WcsError::unsupported_stride(2);
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_missing_length() {
        let err = WcsError::missing_length("compute the last pixel");
        assert!(err.to_string().contains("last pixel"));
    }

    #[test]
    fn test_insufficient_points() {
        let err = WcsError::insufficient_points(1);
        assert!(err.to_string().contains("1 point"));
    }

    #[test]
    fn test_invalid_shape_kind() {
        let err = WcsError::invalid_shape_kind("hexagon");
        assert!(err.to_string().contains("hexagon"));
    }

    #[test]
    fn test_from_core_error() {
        let err: WcsError = CoreError::unknown_unit("furlong").into();
        assert!(err.to_string().contains("furlong"));
    }
}
